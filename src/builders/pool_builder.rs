//! Builders to construct pool stores from configuration.

use crate::config::SchedulerConfig;
use crate::core::{PoolSlotsAvailableDep, SchedulerError};
use crate::infra::InMemoryPoolStore;

/// Build an in-memory pool store holding every configured pool plus the
/// default pool.
pub fn build_pool_store(cfg: &SchedulerConfig) -> Result<InMemoryPoolStore, SchedulerError> {
    cfg.validate()
        .map_err(|e| SchedulerError::InvalidPool(format!("config invalid: {e}")))?;

    let cfg = cfg.clone().with_default_pool();
    let store = InMemoryPoolStore::new();
    for (name, pool_cfg) in &cfg.pools {
        store.create_pool(pool_cfg.to_pool(name))?;
    }
    tracing::debug!(pools = store.pool_count(), "pool store built");
    Ok(store)
}

/// Build the slot admission dependency over a store built from `cfg`.
pub fn build_pool_dep(
    cfg: &SchedulerConfig,
) -> Result<PoolSlotsAvailableDep<InMemoryPoolStore>, SchedulerError> {
    Ok(PoolSlotsAvailableDep::new(build_pool_store(cfg)?))
}
