//! # Pool Gate
//!
//! Pool slot admission control for task schedulers.
//!
//! A scheduler runs several independent checks before it dispatches a task
//! instance. This crate provides the one that guards bounded pools: each
//! [`Pool`](core::Pool) has a slot limit, and a task instance may only start
//! when its pool has room for the slots it asks for.
//!
//! ## How a decision is made
//!
//! [`PoolSlotsAvailableDep`](core::PoolSlotsAvailableDep) answers in order:
//!
//! 1. A task instance assigned to a pool that does not exist is refused.
//! 2. A task instance already in one of the [`EXECUTION_STATES`](core::EXECUTION_STATES)
//!    passes; it is part of the occupancy it would otherwise be checked against.
//! 3. A deferred task instance passes when its pool does not count deferred work.
//! 4. Anything else passes only if the pool's open slots cover its `pool_slots`.
//!
//! Open slots are recomputed from the live task instances on every call. The
//! check reserves nothing, so two callers can both be told "yes" for the last
//! slot; the dispatcher decides what to do about that.
//!
//! ```rust,ignore
//! use pool_gate::core::{Pool, PoolSlotsAvailableDep, TaskInstanceRequest, TaskInstanceState, TiDep};
//! use pool_gate::infra::InMemoryPoolStore;
//!
//! let store = InMemoryPoolStore::new();
//! store.create_pool(Pool::new("gpu", 2, false)?)?;
//! let dep = PoolSlotsAvailableDep::new(store);
//!
//! let ti = TaskInstanceRequest::new("train", "gpu", 1, TaskInstanceState::Scheduled)?;
//! assert!(dep.is_met(&ti)?);
//! ```

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core admission abstractions and slot accounting.
pub mod core;
/// Configuration models for pools.
pub mod config;
/// Builders to construct admission components from configuration.
pub mod builders;
/// Infrastructure adapters for pool storage.
pub mod infra;
/// API surface for scheduler services.
pub mod runtime;
/// Shared utilities.
pub mod util;
