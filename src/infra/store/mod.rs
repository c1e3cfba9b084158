//! Pool store backends.

pub mod memory;

pub use memory::InMemoryPoolStore;
