//! Trait for durable client preferences.

use crate::error::AppError;
use async_trait::async_trait;

/// Small string key-value store, the local-storage analogue.
///
/// Values are raw strings; encoding (`"true"`, JSON arrays) is the caller's
/// concern.
///
/// # Implementations
///
/// - [`crate::infrastructure::preferences::FilePreferenceStore`] - JSON file on disk
/// - [`crate::infrastructure::preferences::MemoryPreferenceStore`] - In-memory, not durable
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Reads a value. `Ok(None)` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Writes a value through to durable storage.
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}
