//! Business logic services for the application layer.

pub mod export_service;
pub mod preference_service;
pub mod search_service;

pub use export_service::{export_csv, render_csv};
pub use preference_service::{PreferenceService, Preferences};
pub use search_service::{Origin, Resolution, SearchService};
