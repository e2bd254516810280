//! Backend stand-in used when the client runs offline.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::{College, HealthStatus, SetupReport};
use crate::domain::query::CanonicalQuery;
use crate::domain::repositories::CollegeSource;
use crate::error::AppError;

const OFFLINE_MESSAGE: &str = "offline mode is enabled";

/// A source that is never reachable.
///
/// Every call fails with [`AppError::NetworkUnavailable`] without touching the
/// network, so searches always resolve through the local fallback.
pub struct OfflineSource;

impl OfflineSource {
    pub fn new() -> Self {
        debug!("Using OfflineSource (remote backend disabled)");
        Self
    }
}

impl Default for OfflineSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CollegeSource for OfflineSource {
    async fn search(&self, _query: &CanonicalQuery) -> Result<Vec<College>, AppError> {
        Err(AppError::network(OFFLINE_MESSAGE))
    }

    async fn college_by_name(&self, _name: &str) -> Result<Option<College>, AppError> {
        Err(AppError::network(OFFLINE_MESSAGE))
    }

    async fn health(&self) -> Result<HealthStatus, AppError> {
        Err(AppError::network(OFFLINE_MESSAGE))
    }

    async fn seed_sample_data(&self) -> Result<SetupReport, AppError> {
        Err(AppError::network(OFFLINE_MESSAGE))
    }
}
