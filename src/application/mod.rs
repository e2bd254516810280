//! Application layer: services and the search session.
//!
//! Services consume the domain traits and turn them into user-level
//! operations; the session ties the search service to the debounce timer and
//! the stale-response guard.
//!
//! # Available Services
//!
//! - [`services::search_service::SearchService`] - Remote lookup with local fallback
//! - [`services::preference_service::PreferenceService`] - Dark mode and favorites
//! - [`services::export_service`] - CSV export of a result set

pub mod services;
pub mod session;
