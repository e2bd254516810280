//! Result source resolution: remote lookup with local fallback.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{College, HealthStatus, SetupReport};
use crate::domain::filter::filter_colleges;
use crate::domain::query::CanonicalQuery;
use crate::domain::repositories::CollegeSource;
use crate::error::AppError;
use crate::infrastructure::dataset::LocalDataset;

/// Where a result set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Answered by the backend.
    #[default]
    Remote,
    /// Computed from the bundled dataset after the backend failed.
    Fallback,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// The answer to one canonical query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    pub colleges: Vec<College>,
    pub origin: Origin,
    /// The remote failure that caused a fallback, if any.
    pub cause: Option<AppError>,
}

impl Resolution {
    fn remote(colleges: Vec<College>) -> Self {
        Self {
            colleges,
            origin: Origin::Remote,
            cause: None,
        }
    }

    fn fallback(colleges: Vec<College>, cause: Option<AppError>) -> Self {
        Self {
            colleges,
            origin: Origin::Fallback,
            cause,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::Fallback
    }
}

/// Resolves canonical queries into result sets.
///
/// Search and details lookups never fail because of the backend: transport,
/// status and payload errors switch to the bundled dataset. Connectivity checks
/// and seeding pass backend errors through unchanged.
pub struct SearchService<S: CollegeSource + ?Sized> {
    source: Arc<S>,
    dataset: LocalDataset,
}

impl<S: CollegeSource + ?Sized> SearchService<S> {
    pub fn new(source: Arc<S>, dataset: LocalDataset) -> Self {
        Self { source, dataset }
    }

    /// Resolves `query` into a result set.
    ///
    /// An empty query resolves to an empty remote result without touching the
    /// source. Otherwise exactly one remote lookup is attempted.
    pub async fn resolve(&self, query: &CanonicalQuery) -> Resolution {
        if query.is_empty() {
            return Resolution::remote(Vec::new());
        }

        if !self.source.can_serve(query) {
            debug!("Query {} has no remote route, using fallback", query);
            metrics::counter!("college_search_fallback_total", "reason" => "no_route")
                .increment(1);
            return Resolution::fallback(self.dataset.search(query), None);
        }

        match self.source.search(query).await {
            Ok(colleges) => {
                metrics::counter!("college_search_remote_total").increment(1);
                let colleges = if self.source.needs_local_narrowing() {
                    filter_colleges(&colleges, query)
                } else {
                    colleges
                };
                debug!("Query {} resolved remotely: {} colleges", query, colleges.len());
                Resolution::remote(colleges)
            }
            Err(e) if e.triggers_fallback() => {
                warn!("Remote search failed for {}: {}. Using local data", query, e);
                metrics::counter!("college_search_fallback_total", "reason" => e.kind())
                    .increment(1);
                Resolution::fallback(self.dataset.search(query), Some(e))
            }
            Err(e) => {
                // Sources only produce fallback-class errors; anything else is
                // still answered locally so a search never fails.
                warn!("Unexpected error from source for {}: {}", query, e);
                Resolution::fallback(self.dataset.search(query), Some(e))
            }
        }
    }

    /// Looks up one college by name.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `name` is blank (no lookup is made)
    /// - [`AppError::NoResultsFound`] if neither the backend nor the local
    ///   dataset knows the college
    pub async fn college_details(&self, name: &str) -> Result<College, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Please enter a college name."));
        }

        match self.source.college_by_name(name).await {
            Ok(Some(college)) => Ok(college),
            Ok(None) => Err(AppError::NoResultsFound),
            Err(e) if e.triggers_fallback() => {
                warn!("Remote details lookup for '{}' failed: {}. Using local data", name, e);
                metrics::counter!("college_search_fallback_total", "reason" => e.kind())
                    .increment(1);
                self.dataset
                    .find_by_name(name)
                    .ok_or(AppError::NoResultsFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Reports backend health. Errors are returned as-is.
    pub async fn check_connectivity(&self) -> Result<HealthStatus, AppError> {
        let status = self.source.health().await?;
        info!(
            "Backend healthy: database={}, colleges={}",
            status.database, status.college_count
        );
        Ok(status)
    }

    /// Asks the backend to insert its sample data. Errors are returned as-is.
    pub async fn seed_sample_data(&self) -> Result<SetupReport, AppError> {
        let report = self.source.seed_sample_data().await?;
        info!("Backend seeded {} colleges", report.inserted_count);
        Ok(report)
    }
}
