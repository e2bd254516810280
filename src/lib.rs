//! # College Search
//!
//! A terminal client for a college search backend that keeps working when the
//! backend does not.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, the query builder, the fallback
//!   filter, sorting/pagination and the collaborator traits
//! - **Application Layer** ([`application`]) - The resolver, preferences, CSV
//!   export and the debounced search session
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP backend client,
//!   bundled dataset and preference storage
//!
//! ## Features
//!
//! - Debounced search: one request per settled query
//! - Stale-response guard: only the latest query's answer is shown
//! - Local fallback when the backend is unreachable, answers an error status or
//!   returns garbage
//! - Combined (`/search`) or per-field backend APIs
//! - Sorting, pagination (12 per page) and result statistics
//! - Compare up to three colleges, favorites and dark mode
//! - CSV export
//!
//! ## Quick Start
//!
//! ```bash
//! export COLLEGE_API_URL="http://localhost:5000"
//!
//! college-search search --state California --sort rating
//! college-search interactive
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for the binary and
/// integration tests.
pub mod prelude {
    pub use crate::application::services::{
        Origin, PreferenceService, Resolution, SearchService, export_csv, render_csv,
    };
    pub use crate::application::session::{Action, SearchSession, SearchState, Status};
    pub use crate::domain::entities::{College, CollegeType, CompareSelection, SearchParams};
    pub use crate::domain::fields::SearchField;
    pub use crate::domain::projection::SortKey;
    pub use crate::domain::query::{CanonicalQuery, build_query};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
