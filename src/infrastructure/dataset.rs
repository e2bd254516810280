//! Fixed local dataset evaluated by the fallback filter.

use std::sync::Arc;

use tracing::debug;
use validator::Validate;

use crate::domain::entities::College;
use crate::domain::filter::filter_colleges;
use crate::domain::query::CanonicalQuery;
use crate::error::AppError;

const BUILTIN_COLLEGES: &str = include_str!("../../data/colleges.json");

/// Immutable in-memory college list.
///
/// Cheap to clone; the colleges are shared.
#[derive(Debug, Clone)]
pub struct LocalDataset {
    colleges: Arc<[College]>,
}

impl LocalDataset {
    /// Loads the dataset bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MalformedPayload`] if the bundled JSON is invalid.
    pub fn builtin() -> Result<Self, AppError> {
        let colleges: Vec<College> = serde_json::from_str(BUILTIN_COLLEGES)
            .map_err(|e| AppError::malformed(format!("Bundled dataset: {e}")))?;

        for college in &colleges {
            college.validate().map_err(|e| {
                AppError::malformed(format!("Bundled dataset, '{}': {e}", college.name))
            })?;
        }

        debug!("Loaded {} bundled colleges", colleges.len());
        Ok(Self::from_colleges(colleges))
    }

    pub fn from_colleges(colleges: Vec<College>) -> Self {
        Self {
            colleges: colleges.into(),
        }
    }

    pub fn colleges(&self) -> &[College] {
        &self.colleges
    }

    pub fn len(&self) -> usize {
        self.colleges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
    }

    /// Colleges satisfying every field of `query`, in dataset order.
    pub fn search(&self, query: &CanonicalQuery) -> Vec<College> {
        filter_colleges(&self.colleges, query)
    }

    /// First college whose name contains `name`, case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Option<College> {
        let needle = name.trim().to_lowercase();
        self.colleges
            .iter()
            .find(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
    }
}
