//! Pool entity and slot accounting.
//!
//! A [`Pool`] is a named capacity bucket. Occupancy is never stored: it is
//! derived from the live task instances handed to [`Pool::open_slots`] each
//! time it is asked, so there is no counter that can drift.

use serde::{Deserialize, Serialize};

use crate::core::{SchedulerError, TaskInstanceRequest, TaskInstanceState};

/// Name of the pool task instances use when none is assigned.
pub const DEFAULT_POOL_NAME: &str = "default_pool";
/// Slot limit of the default pool when configuration does not override it.
pub const DEFAULT_POOL_SLOTS: u32 = 128;
/// Longest accepted pool name.
pub const MAX_POOL_NAME_LEN: usize = 256;

/// A named bucket of execution slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Unique pool name.
    pub name: String,
    /// Total slots.
    pub slot_limit: u32,
    /// Whether deferred task instances count against the limit.
    pub include_deferred: bool,
    /// Free-form description shown in listings.
    #[serde(default)]
    pub description: Option<String>,
}

/// Slot usage breakdown for a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Configured slot limit.
    pub total: u32,
    /// Slots held by running task instances.
    pub running: u64,
    /// Slots held by queued task instances.
    pub queued: u64,
    /// Slots requested by scheduled task instances (not yet occupying).
    pub scheduled: u64,
    /// Slots requested by deferred task instances.
    pub deferred: u64,
    /// Slots counted against the limit.
    pub occupied: u64,
    /// Remaining slots; negative when the pool is over-subscribed.
    pub open: i64,
}

impl Pool {
    /// Build a validated pool.
    pub fn new(
        name: impl Into<String>,
        slot_limit: u32,
        include_deferred: bool,
    ) -> Result<Self, SchedulerError> {
        let pool = Self {
            name: name.into(),
            slot_limit,
            include_deferred,
            description: None,
        };
        pool.validate()?;
        Ok(pool)
    }

    /// The pool every deployment carries.
    pub fn default_pool() -> Self {
        Self {
            name: DEFAULT_POOL_NAME.to_string(),
            slot_limit: DEFAULT_POOL_SLOTS,
            include_deferred: false,
            description: Some("Default pool".to_string()),
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate the pool definition.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.name.trim().is_empty() {
            return Err(SchedulerError::InvalidPool("pool name must not be empty".into()));
        }
        if self.name.chars().count() > MAX_POOL_NAME_LEN {
            return Err(SchedulerError::InvalidPool(format!(
                "pool name longer than {MAX_POOL_NAME_LEN} characters"
            )));
        }
        Ok(())
    }

    /// Returns true if a task instance in `state` counts against this pool.
    pub fn occupies_slot(&self, state: TaskInstanceState) -> bool {
        state.is_execution_state()
            || (self.include_deferred && state == TaskInstanceState::Deferred)
    }

    /// Sum of slots held by task instances currently occupying this pool.
    ///
    /// Instances assigned to other pools are ignored.
    pub fn occupied_slots<'a, I>(&self, instances: I) -> u64
    where
        I: IntoIterator<Item = &'a TaskInstanceRequest>,
    {
        instances
            .into_iter()
            .filter(|ti| ti.pool == self.name && self.occupies_slot(ti.state))
            .map(|ti| u64::from(ti.pool_slots))
            .sum()
    }

    /// Slots still free: `slot_limit` minus occupied slots.
    pub fn open_slots<'a, I>(&self, instances: I) -> i64
    where
        I: IntoIterator<Item = &'a TaskInstanceRequest>,
    {
        let occupied = i64::try_from(self.occupied_slots(instances)).unwrap_or(i64::MAX);
        i64::from(self.slot_limit).saturating_sub(occupied)
    }

    /// Per-state slot breakdown.
    pub fn slot_stats<'a, I>(&self, instances: I) -> PoolStats
    where
        I: IntoIterator<Item = &'a TaskInstanceRequest>,
    {
        let mut stats = PoolStats {
            total: self.slot_limit,
            ..PoolStats::default()
        };
        for ti in instances.into_iter().filter(|ti| ti.pool == self.name) {
            let slots = u64::from(ti.pool_slots);
            match ti.state {
                TaskInstanceState::Running => stats.running += slots,
                TaskInstanceState::Queued => stats.queued += slots,
                TaskInstanceState::Scheduled => stats.scheduled += slots,
                TaskInstanceState::Deferred => stats.deferred += slots,
                _ => {}
            }
            if self.occupies_slot(ti.state) {
                stats.occupied += slots;
            }
        }
        let occupied = i64::try_from(stats.occupied).unwrap_or(i64::MAX);
        stats.open = i64::from(self.slot_limit).saturating_sub(occupied);
        stats
    }
}
