//! API surface for embedding the admission check in a scheduler service.

pub mod api;

pub use api::{check_admission, health, list_pools, AdmissionRequest, AdmissionResponse, Health, PoolSnapshot};
