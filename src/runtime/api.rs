//! API-facing request/response models.

use serde::{Deserialize, Serialize};

use crate::core::{
    PoolSlotsAvailableDep, PoolStats, PoolStore, SchedulerError, TaskInstanceRequest,
    TaskInstanceState, TiDep,
};

/// Admission check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionRequest {
    /// Task identifier.
    pub task_id: String,
    /// Pool the task instance is assigned to.
    pub pool: String,
    /// Slots the task instance needs.
    pub pool_slots: u32,
    /// Current task instance state.
    #[serde(default)]
    pub state: TaskInstanceState,
}

/// Admission check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionResponse {
    /// Task identifier.
    pub task_id: String,
    /// Whether the task instance may proceed.
    pub admitted: bool,
    /// Explanation from the dependency.
    pub reason: String,
}

/// Pool snapshot data for listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Pool identifier.
    pub name: String,
    /// Whether deferred task instances count against the pool.
    pub include_deferred: bool,
    /// Optional description.
    pub description: Option<String>,
    /// Slot usage at snapshot time.
    pub stats: PoolStats,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
}

/// Run the slot admission check for one request.
pub fn check_admission<S: PoolStore>(
    dep: &PoolSlotsAvailableDep<S>,
    req: AdmissionRequest,
) -> Result<AdmissionResponse, SchedulerError> {
    let ti = TaskInstanceRequest::new(req.task_id, req.pool, req.pool_slots, req.state)?;
    let status = dep.dep_status(&ti)?;
    Ok(AdmissionResponse {
        task_id: ti.task_id,
        admitted: status.passed,
        reason: status.reason,
    })
}

/// Snapshot every pool in the store, sorted by name.
pub fn list_pools<S: PoolStore + ?Sized>(store: &S) -> Result<Vec<PoolSnapshot>, SchedulerError> {
    let mut names = store.pool_names()?;
    names.sort();
    names
        .iter()
        .map(|name| -> Result<PoolSnapshot, SchedulerError> {
            let pool = store.lookup(name)?;
            let stats = store.slot_stats(&pool)?;
            Ok(PoolSnapshot {
                name: pool.name,
                include_deferred: pool.include_deferred,
                description: pool.description,
                stats,
            })
        })
        .collect()
}

/// Return a health payload.
pub const fn health() -> Health {
    Health { ok: true }
}
