//! Read-side abstraction over the store holding pools and task instances.

use crate::core::{Pool, PoolStats, SchedulerError, TaskInstanceRequest};

/// Abstraction for pool backends.
///
/// Implementations only answer reads; admission never writes through this trait.
pub trait PoolStore: Send + Sync {
    /// Resolve a pool by name, failing with [`SchedulerError::PoolNotFound`].
    fn lookup(&self, name: &str) -> Result<Pool, SchedulerError>;

    /// Snapshot of task instances assigned to the named pool.
    fn task_instances(&self, pool: &str) -> Result<Vec<TaskInstanceRequest>, SchedulerError>;

    /// Names of all defined pools.
    fn pool_names(&self) -> Result<Vec<String>, SchedulerError>;

    /// Slots open in `pool` right now.
    fn open_slots(&self, pool: &Pool) -> Result<i64, SchedulerError> {
        let instances = self.task_instances(&pool.name)?;
        Ok(pool.open_slots(&instances))
    }

    /// Per-state slot usage of `pool` right now.
    fn slot_stats(&self, pool: &Pool) -> Result<PoolStats, SchedulerError> {
        let instances = self.task_instances(&pool.name)?;
        Ok(pool.slot_stats(&instances))
    }
}
