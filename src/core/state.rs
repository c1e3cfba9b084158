//! Task instance states and the execution-state table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a task instance as seen by the scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskInstanceState {
    /// Not yet considered by the scheduler.
    #[default]
    None,
    /// Dependencies met, waiting to be queued.
    Scheduled,
    /// Handed to an executor, waiting for a worker.
    Queued,
    /// Executing on a worker.
    Running,
    /// Finished successfully.
    Success,
    /// Asked to restart while running.
    Restarting,
    /// Finished with an error.
    Failed,
    /// Failed, waiting for a retry.
    UpForRetry,
    /// Sensor waiting for its next poke.
    UpForReschedule,
    /// An upstream task failed.
    UpstreamFailed,
    /// Skipped by branching or a short circuit.
    Skipped,
    /// Task no longer present in its definition.
    Removed,
    /// Suspended on a trigger, not holding a worker.
    Deferred,
}

/// States that already hold a pool slot.
///
/// Occupancy accounting and the admission short-circuit both read this table.
pub const EXECUTION_STATES: &[TaskInstanceState] =
    &[TaskInstanceState::Queued, TaskInstanceState::Running];

impl TaskInstanceState {
    /// All states, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::None,
        Self::Scheduled,
        Self::Queued,
        Self::Running,
        Self::Success,
        Self::Restarting,
        Self::Failed,
        Self::UpForRetry,
        Self::UpForReschedule,
        Self::UpstreamFailed,
        Self::Skipped,
        Self::Removed,
        Self::Deferred,
    ];

    /// Returns true if a task instance in this state occupies a pool slot.
    pub fn is_execution_state(self) -> bool {
        EXECUTION_STATES.contains(&self)
    }

    /// Returns true for states that will not progress further on their own.
    pub const fn is_finished(self) -> bool {
        matches!(
            self,
            Self::Success | Self::Failed | Self::UpstreamFailed | Self::Skipped | Self::Removed
        )
    }

    /// Lowercase name used in logs and serialized payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Scheduled => "scheduled",
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Success => "success",
            Self::Restarting => "restarting",
            Self::Failed => "failed",
            Self::UpForRetry => "up_for_retry",
            Self::UpForReschedule => "up_for_reschedule",
            Self::UpstreamFailed => "upstream_failed",
            Self::Skipped => "skipped",
            Self::Removed => "removed",
            Self::Deferred => "deferred",
        }
    }
}

impl fmt::Display for TaskInstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
