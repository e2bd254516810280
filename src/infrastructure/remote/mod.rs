//! Remote backend access.
//!
//! Provides two [`crate::domain::repositories::CollegeSource`] implementations:
//! - [`HttpCollegeSource`] - REST client for the college backend
//! - [`OfflineSource`] - Always unavailable, for offline use

mod http_source;
mod offline_source;

pub use http_source::{ApiMode, HttpCollegeSource};
pub use offline_source::OfflineSource;
