//! Error types for pool admission operations.

use thiserror::Error;

/// Errors produced by pool admission components.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// No pool is defined under the given name.
    #[error("pool not found: {0}")]
    PoolNotFound(String),
    /// Requested slots exceed the pool's open slots.
    #[error("capacity exceeded: requested {requested} slots, {open} open slots")]
    CapacityExceeded {
        /// Slots requested by the task instance.
        requested: u32,
        /// Slots open at evaluation time.
        open: i64,
    },
    /// Pool definition rejected by validation.
    #[error("invalid pool: {0}")]
    InvalidPool(String),
    /// Task instance request rejected by validation.
    #[error("invalid task instance: {0}")]
    InvalidTaskInstance(String),
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
