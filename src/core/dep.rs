//! Pool slot admission check.
//!
//! [`PoolSlotsAvailableDep`] is one gate a scheduler consults before dispatching
//! a task instance. It reads pool occupancy, never reserves a slot, and holds no
//! lock across calls. Two evaluations racing on the same pool can both pass;
//! the dispatcher owns that race.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::{
    build_audit_event, AuditSink, PoolStore, SchedulerError, TaskInstanceRequest,
    TaskInstanceState,
};

/// Outcome of one dependency evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepStatus {
    /// Name of the dependency that produced this status.
    pub dep_name: String,
    /// Whether the task instance passed.
    pub passed: bool,
    /// Human readable explanation.
    pub reason: String,
}

impl DepStatus {
    fn passing(dep_name: &str, reason: impl Into<String>) -> Self {
        Self {
            dep_name: dep_name.to_string(),
            passed: true,
            reason: reason.into(),
        }
    }

    fn failing(dep_name: &str, reason: impl Into<String>) -> Self {
        Self {
            dep_name: dep_name.to_string(),
            passed: false,
            reason: reason.into(),
        }
    }
}

/// A gate a task instance must clear before it is dispatched.
pub trait TiDep: Send + Sync {
    /// Display name used in statuses and logs.
    fn name(&self) -> &'static str;

    /// Whether callers may choose to skip this gate.
    fn is_ignorable(&self) -> bool {
        false
    }

    /// Evaluate the gate. Store failures surface as errors, never as a status.
    fn dep_status(&self, ti: &TaskInstanceRequest) -> Result<DepStatus, SchedulerError>;

    /// Shorthand for `dep_status(ti)?.passed`.
    fn is_met(&self, ti: &TaskInstanceRequest) -> Result<bool, SchedulerError> {
        Ok(self.dep_status(ti)?.passed)
    }

    /// Reasons the gate refused `ti`; empty when it passed.
    fn failure_reasons(&self, ti: &TaskInstanceRequest) -> Result<Vec<String>, SchedulerError> {
        let status = self.dep_status(ti)?;
        Ok(if status.passed {
            Vec::new()
        } else {
            vec![status.reason]
        })
    }
}

/// Passes only when the task instance's pool can take its slots.
pub struct PoolSlotsAvailableDep<S> {
    store: S,
    audit: Option<Mutex<Box<dyn AuditSink>>>,
}

impl<S: PoolStore> PoolSlotsAvailableDep<S> {
    /// Dependency name reported in statuses.
    pub const NAME: &'static str = "Pool Slots Available";

    /// Create the dependency over a pool store.
    pub const fn new(store: S) -> Self {
        Self { store, audit: None }
    }

    /// Attach an audit sink that receives one event per decision.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(Mutex::new(audit));
        self
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn evaluate(&self, ti: &TaskInstanceRequest) -> Result<DepStatus, SchedulerError> {
        let pool = match self.store.lookup(&ti.pool) {
            Ok(pool) => pool,
            Err(SchedulerError::PoolNotFound(name)) => {
                tracing::warn!(task_id = %ti.task_id, pool = %name, "pool does not exist");
                return Ok(DepStatus::failing(
                    Self::NAME,
                    format!("Tasks using non-existent pool '{name}' will not be scheduled"),
                ));
            }
            Err(e) => return Err(e),
        };

        if ti.state.is_execution_state() {
            return Ok(DepStatus::passing(
                Self::NAME,
                format!("Task instance already holds a slot in pool '{}'", pool.name),
            ));
        }

        if ti.state == TaskInstanceState::Deferred && !pool.include_deferred {
            return Ok(DepStatus::passing(
                Self::NAME,
                format!("Pool '{}' does not count deferred task instances", pool.name),
            ));
        }

        let open_slots = self.store.open_slots(&pool)?;
        if open_slots < i64::from(ti.pool_slots) {
            tracing::info!(
                task_id = %ti.task_id,
                pool = %pool.name,
                requested = ti.pool_slots,
                open_slots,
                "not enough open slots"
            );
            return Ok(DepStatus::failing(
                Self::NAME,
                format!(
                    "Not scheduling in pool {}: {}",
                    pool.name,
                    SchedulerError::CapacityExceeded {
                        requested: ti.pool_slots,
                        open: open_slots,
                    }
                ),
            ));
        }

        Ok(DepStatus::passing(
            Self::NAME,
            format!(
                "There are enough open slots in {} to execute the task",
                pool.name
            ),
        ))
    }

    fn record_audit(&self, ti: &TaskInstanceRequest, status: &DepStatus) {
        if let Some(audit_sink) = &self.audit {
            let action = if status.passed { "admit" } else { "refuse" };
            audit_sink.lock().record(build_audit_event(
                uuid::Uuid::new_v4().to_string(),
                ti.task_id.clone(),
                ti.pool.clone(),
                action,
                Some(status.reason.clone()),
            ));
        }
    }
}

impl<S: PoolStore> TiDep for PoolSlotsAvailableDep<S> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_ignorable(&self) -> bool {
        true
    }

    fn dep_status(&self, ti: &TaskInstanceRequest) -> Result<DepStatus, SchedulerError> {
        let status = match self.evaluate(ti) {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(task_id = %ti.task_id, pool = %ti.pool, "pool query failed: {}", e);
                return Err(e);
            }
        };
        if status.passed {
            tracing::debug!(task_id = %ti.task_id, pool = %ti.pool, state = %ti.state, "pool slots available");
        }
        self.record_audit(ti, &status);
        Ok(status)
    }
}
