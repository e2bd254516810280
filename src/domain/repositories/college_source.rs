//! Trait for the remote college backend.

use crate::domain::entities::{College, HealthStatus, SetupReport};
use crate::domain::query::CanonicalQuery;
use crate::error::AppError;
use async_trait::async_trait;

/// Access to the authoritative college backend.
///
/// # Implementations
///
/// - [`crate::infrastructure::remote::HttpCollegeSource`] - HTTP client for the backend
/// - [`crate::infrastructure::remote::OfflineSource`] - Always unavailable, forces the fallback
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollegeSource: Send + Sync {
    /// Looks up colleges matching a non-empty canonical query.
    ///
    /// Implementations may return a superset of the matching colleges (see
    /// [`CollegeSource::needs_local_narrowing`]).
    ///
    /// # Errors
    ///
    /// - [`AppError::NetworkUnavailable`] on transport failure
    /// - [`AppError::BadResponseStatus`] on a non-OK status
    /// - [`AppError::MalformedPayload`] when the body is not a valid college list
    async fn search(&self, query: &CanonicalQuery) -> Result<Vec<College>, AppError>;

    /// Fetches one college by name.
    ///
    /// Returns `Ok(None)` when the backend answers that no college matches.
    ///
    /// # Errors
    ///
    /// Same transport, status and payload errors as [`CollegeSource::search`].
    async fn college_by_name(&self, name: &str) -> Result<Option<College>, AppError>;

    /// Queries the backend health endpoint.
    async fn health(&self) -> Result<HealthStatus, AppError>;

    /// Asks the backend to seed its sample data.
    async fn seed_sample_data(&self) -> Result<SetupReport, AppError>;

    /// False when the backend API cannot express `query` at all; the resolver
    /// then goes straight to the fallback.
    fn can_serve(&self, _query: &CanonicalQuery) -> bool {
        true
    }

    /// True when [`CollegeSource::search`] only honors part of the query and
    /// the caller must apply the full predicate set to its answer.
    fn needs_local_narrowing(&self) -> bool {
        false
    }
}
