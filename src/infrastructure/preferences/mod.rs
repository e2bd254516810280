//! Preference storage backends.
//!
//! Provides two [`crate::domain::repositories::PreferenceStore`] implementations:
//! - [`FilePreferenceStore`] - JSON file on disk
//! - [`MemoryPreferenceStore`] - Process-lifetime fallback

mod file_store;
mod memory_store;

pub use file_store::FilePreferenceStore;
pub use memory_store::MemoryPreferenceStore;
