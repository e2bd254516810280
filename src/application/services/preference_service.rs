//! Dark mode and favorites, persisted through a [`PreferenceStore`].

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::repositories::PreferenceStore;
use crate::error::AppError;

pub const DARK_MODE_KEY: &str = "darkMode";
pub const FAVORITES_KEY: &str = "favorites";

/// Snapshot of the user's preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
    pub favorites: BTreeSet<String>,
}

/// Reads preferences once and writes every change straight through.
///
/// Values that cannot be read or parsed fall back to the defaults (dark mode
/// off, no favorites) with a warning; loading never fails.
pub struct PreferenceService<P: PreferenceStore + ?Sized> {
    store: Arc<P>,
    current: RwLock<Preferences>,
}

impl<P: PreferenceStore + ?Sized> PreferenceService<P> {
    /// Loads preferences from `store`.
    pub async fn load(store: Arc<P>) -> Self {
        let dark_mode = match store.get(DARK_MODE_KEY).await {
            Ok(Some(raw)) => parse_dark_mode(&raw).unwrap_or_else(|| {
                warn!("Ignoring invalid {} value '{}'", DARK_MODE_KEY, raw);
                false
            }),
            Ok(None) => false,
            Err(e) => {
                warn!("Cannot read {}: {}", DARK_MODE_KEY, e);
                false
            }
        };

        let favorites = match store.get(FAVORITES_KEY).await {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw)
                .map(|names| names.into_iter().collect())
                .unwrap_or_else(|e| {
                    warn!("Ignoring invalid {} value: {}", FAVORITES_KEY, e);
                    BTreeSet::new()
                }),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                warn!("Cannot read {}: {}", FAVORITES_KEY, e);
                BTreeSet::new()
            }
        };

        debug!(
            "Loaded preferences: dark_mode={}, favorites={}",
            dark_mode,
            favorites.len()
        );

        Self {
            store,
            current: RwLock::new(Preferences {
                dark_mode,
                favorites,
            }),
        }
    }

    pub async fn snapshot(&self) -> Preferences {
        self.current.read().await.clone()
    }

    pub async fn dark_mode(&self) -> bool {
        self.current.read().await.dark_mode
    }

    /// Sets dark mode and persists it.
    ///
    /// The in-memory value only changes once the write succeeded.
    pub async fn set_dark_mode(&self, enabled: bool) -> Result<bool, AppError> {
        let mut current = self.current.write().await;
        self.store
            .set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
            .await?;
        current.dark_mode = enabled;
        Ok(enabled)
    }

    /// Flips dark mode and returns the new value.
    pub async fn toggle_dark_mode(&self) -> Result<bool, AppError> {
        let enabled = !self.dark_mode().await;
        self.set_dark_mode(enabled).await
    }

    pub async fn favorites(&self) -> Vec<String> {
        self.current.read().await.favorites.iter().cloned().collect()
    }

    pub async fn is_favorite(&self, name: &str) -> bool {
        self.current.read().await.favorites.contains(name)
    }

    /// Adds or removes `name` from the favorites.
    ///
    /// Returns true if the college is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a blank name and
    /// [`AppError::Storage`] if the change cannot be persisted.
    pub async fn toggle_favorite(&self, name: &str) -> Result<bool, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Please enter a college name."));
        }

        let mut current = self.current.write().await;
        let mut favorites = current.favorites.clone();
        let now_favorite = if favorites.remove(name) {
            false
        } else {
            favorites.insert(name.to_string());
            true
        };

        let encoded = serde_json::to_string(&favorites)
            .map_err(|e| AppError::storage(format!("Cannot encode favorites: {e}")))?;
        self.store.set(FAVORITES_KEY, &encoded).await?;

        current.favorites = favorites;
        Ok(now_favorite)
    }
}

fn parse_dark_mode(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockPreferenceStore;

    fn store_with(
        dark_mode: Option<&'static str>,
        favorites: Option<&'static str>,
    ) -> MockPreferenceStore {
        let mut store = MockPreferenceStore::new();
        store
            .expect_get()
            .withf(|key| key == DARK_MODE_KEY)
            .returning(move |_| Ok(dark_mode.map(String::from)));
        store
            .expect_get()
            .withf(|key| key == FAVORITES_KEY)
            .returning(move |_| Ok(favorites.map(String::from)));
        store
    }

    #[tokio::test]
    async fn test_load_defaults_when_empty() {
        let service = PreferenceService::load(Arc::new(store_with(None, None))).await;

        assert_eq!(service.snapshot().await, Preferences::default());
    }

    #[tokio::test]
    async fn test_load_existing_values() {
        let store = store_with(Some("true"), Some(r#"["Yale University","Duke University"]"#));
        let service = PreferenceService::load(Arc::new(store)).await;

        assert!(service.dark_mode().await);
        assert_eq!(
            service.favorites().await,
            vec!["Duke University".to_string(), "Yale University".to_string()]
        );
    }

    #[tokio::test]
    async fn test_corrupt_values_load_as_defaults() {
        let store = store_with(Some("yes please"), Some("{not json"));
        let service = PreferenceService::load(Arc::new(store)).await;

        assert_eq!(service.snapshot().await, Preferences::default());
    }

    #[tokio::test]
    async fn test_store_errors_load_as_defaults() {
        let mut store = MockPreferenceStore::new();
        store
            .expect_get()
            .returning(|_| Err(AppError::storage("disk on fire")));

        let service = PreferenceService::load(Arc::new(store)).await;

        assert_eq!(service.snapshot().await, Preferences::default());
    }

    #[tokio::test]
    async fn test_toggle_dark_mode_writes_through() {
        let mut store = store_with(None, None);
        store
            .expect_set()
            .withf(|key, value| key == DARK_MODE_KEY && value == "true")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = PreferenceService::load(Arc::new(store)).await;

        assert!(service.toggle_dark_mode().await.unwrap());
        assert!(service.dark_mode().await);
    }

    #[tokio::test]
    async fn test_toggle_favorite_adds_then_removes() {
        let mut store = store_with(None, Some(r#"["Yale University"]"#));
        store
            .expect_set()
            .withf(|key, value| {
                key == FAVORITES_KEY && value == r#"["Rice University","Yale University"]"#
            })
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_set()
            .withf(|key, value| key == FAVORITES_KEY && value == r#"["Rice University"]"#)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = PreferenceService::load(Arc::new(store)).await;

        assert!(service.toggle_favorite("Rice University").await.unwrap());
        assert!(!service.toggle_favorite("Yale University").await.unwrap());
        assert!(service.is_favorite("Rice University").await);
        assert!(!service.is_favorite("Yale University").await);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_value() {
        let mut store = store_with(None, None);
        store
            .expect_set()
            .returning(|_, _| Err(AppError::storage("read-only")));

        let service = PreferenceService::load(Arc::new(store)).await;

        assert!(service.toggle_favorite("Rice University").await.is_err());
        assert!(service.favorites().await.is_empty());
        assert!(service.set_dark_mode(true).await.is_err());
        assert!(!service.dark_mode().await);
    }
}
