//! Configuration models for pools.

pub mod pool;

pub use pool::{load_from_env, load_from_env_file, PoolConfig, SchedulerConfig, CONFIG_PATH_ENV};
