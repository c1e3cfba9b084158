//! The slice of task instance state the admission check reads.

use serde::{Deserialize, Serialize};

use crate::core::{SchedulerError, TaskInstanceState};

/// A task instance asking to run in a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInstanceRequest {
    /// Identifier used in logs and audit events.
    pub task_id: String,
    /// Name of the pool the task instance is assigned to.
    pub pool: String,
    /// Slots consumed while the task instance occupies the pool.
    pub pool_slots: u32,
    /// Current lifecycle state.
    pub state: TaskInstanceState,
}

impl TaskInstanceRequest {
    /// Build a validated request.
    pub fn new(
        task_id: impl Into<String>,
        pool: impl Into<String>,
        pool_slots: u32,
        state: TaskInstanceState,
    ) -> Result<Self, SchedulerError> {
        let req = Self {
            task_id: task_id.into(),
            pool: pool.into(),
            pool_slots,
            state,
        };
        req.validate()?;
        Ok(req)
    }

    /// Reject requests that could never be admitted meaningfully.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.pool_slots == 0 {
            return Err(SchedulerError::InvalidTaskInstance(format!(
                "task `{}`: pool_slots must be greater than 0",
                self.task_id
            )));
        }
        if self.pool.is_empty() {
            return Err(SchedulerError::InvalidTaskInstance(format!(
                "task `{}`: pool name must not be empty",
                self.task_id
            )));
        }
        Ok(())
    }

    /// Returns a copy moved to another state.
    #[must_use]
    pub fn with_state(mut self, state: TaskInstanceState) -> Self {
        self.state = state;
        self
    }

    /// Returns a copy reassigned to another pool.
    #[must_use]
    pub fn with_pool(mut self, pool: impl Into<String>) -> Self {
        self.pool = pool.into();
        self
    }
}
