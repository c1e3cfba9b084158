//! In-memory pool store.
//!
//! Holds pool definitions and the live task instance table behind
//! `parking_lot::RwLock`s. Admission reads take shared locks only; the write
//! methods stand in for the administrative and scheduler-side updates a
//! durable store would receive.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;

use crate::core::{Pool, PoolStore, SchedulerError, TaskInstanceRequest, DEFAULT_POOL_NAME};

/// Pool store for development, tests and embedded schedulers.
#[derive(Default)]
pub struct InMemoryPoolStore {
    pools: RwLock<BTreeMap<String, Pool>>,
    /// Task instances keyed by task id, so an instance is never counted twice.
    task_instances: RwLock<HashMap<String, TaskInstanceRequest>>,
}

impl InMemoryPoolStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding only the default pool.
    pub fn with_default_pool() -> Self {
        let store = Self::new();
        store
            .pools
            .write()
            .insert(DEFAULT_POOL_NAME.to_string(), Pool::default_pool());
        store
    }

    /// Define a new pool. Names are unique.
    pub fn create_pool(&self, pool: Pool) -> Result<(), SchedulerError> {
        pool.validate()?;
        let mut pools = self.pools.write();
        if pools.contains_key(&pool.name) {
            return Err(SchedulerError::InvalidPool(format!(
                "pool `{}` already exists",
                pool.name
            )));
        }
        tracing::info!(pool = %pool.name, slots = pool.slot_limit, include_deferred = pool.include_deferred, "pool created");
        pools.insert(pool.name.clone(), pool);
        Ok(())
    }

    /// Replace the definition of an existing pool.
    pub fn update_pool(&self, pool: Pool) -> Result<(), SchedulerError> {
        pool.validate()?;
        let mut pools = self.pools.write();
        match pools.get_mut(&pool.name) {
            Some(existing) => {
                tracing::info!(pool = %pool.name, slots = pool.slot_limit, "pool updated");
                *existing = pool;
                Ok(())
            }
            None => Err(SchedulerError::PoolNotFound(pool.name)),
        }
    }

    /// Remove a pool. The default pool cannot be removed.
    pub fn delete_pool(&self, name: &str) -> Result<Pool, SchedulerError> {
        if name == DEFAULT_POOL_NAME {
            return Err(SchedulerError::InvalidPool(
                "default_pool cannot be deleted".into(),
            ));
        }
        let removed = self
            .pools
            .write()
            .remove(name)
            .ok_or_else(|| SchedulerError::PoolNotFound(name.to_string()))?;
        tracing::info!(pool = %name, "pool deleted");
        Ok(removed)
    }

    /// Insert or replace a task instance, keyed by its task id.
    pub fn upsert_task_instance(&self, ti: TaskInstanceRequest) -> Result<(), SchedulerError> {
        ti.validate()?;
        self.task_instances.write().insert(ti.task_id.clone(), ti);
        Ok(())
    }

    /// Forget a task instance. Returns it if it was present.
    pub fn remove_task_instance(&self, task_id: &str) -> Option<TaskInstanceRequest> {
        self.task_instances.write().remove(task_id)
    }

    /// Number of pools defined.
    pub fn pool_count(&self) -> usize {
        self.pools.read().len()
    }
}

impl PoolStore for InMemoryPoolStore {
    fn lookup(&self, name: &str) -> Result<Pool, SchedulerError> {
        self.pools
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| SchedulerError::PoolNotFound(name.to_string()))
    }

    fn task_instances(&self, pool: &str) -> Result<Vec<TaskInstanceRequest>, SchedulerError> {
        Ok(self
            .task_instances
            .read()
            .values()
            .filter(|ti| ti.pool == pool)
            .cloned()
            .collect())
    }

    fn pool_names(&self) -> Result<Vec<String>, SchedulerError> {
        Ok(self.pools.read().keys().cloned().collect())
    }
}
