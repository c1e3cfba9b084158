//! Builders to construct admission components from configuration.

pub mod pool_builder;

pub use pool_builder::{build_pool_dep, build_pool_store};
