//! Core admission abstractions and slot accounting.

pub mod audit;
pub mod dep;
pub mod error;
pub mod pool;
pub mod state;
pub mod store;
pub mod task_instance;

pub use audit::{build_audit_event, AuditEvent, AuditSink, InMemoryAuditSink, SharedAuditSink};
pub use dep::{DepStatus, PoolSlotsAvailableDep, TiDep};
pub use error::{AppResult, SchedulerError};
pub use pool::{Pool, PoolStats, DEFAULT_POOL_NAME, DEFAULT_POOL_SLOTS, MAX_POOL_NAME_LEN};
pub use state::{TaskInstanceState, EXECUTION_STATES};
pub use store::PoolStore;
pub use task_instance::TaskInstanceRequest;
