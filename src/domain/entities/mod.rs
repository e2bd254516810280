//! Core domain entities.
//!
//! - [`College`] - A college record, as served by the backend or the local dataset
//! - [`SearchParams`] - Raw text of the search form
//! - [`CompareSelection`] - Up to three colleges picked for comparison
//! - [`HealthStatus`], [`SetupReport`] - Maintenance endpoint payloads

pub mod backend_status;
pub mod college;
pub mod compare;
pub mod search_params;

pub use backend_status::{ErrorBody, HealthStatus, SetupReport};
pub use college::{College, CollegeType};
pub use compare::{COMPARE_CAPACITY, CompareSelection};
pub use search_params::SearchParams;
