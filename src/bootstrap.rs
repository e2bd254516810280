//! Process startup: logging and service wiring.
//!
//! Picks the remote source (HTTP or offline) and the preference store (file,
//! or in-memory when the file cannot be opened), then loads the preferences.

use crate::application::services::{PreferenceService, SearchService};
use crate::config::Config;
use crate::domain::repositories::{CollegeSource, PreferenceStore};
use crate::infrastructure::dataset::LocalDataset;
use crate::infrastructure::preferences::{FilePreferenceStore, MemoryPreferenceStore};
use crate::infrastructure::remote::{HttpCollegeSource, OfflineSource};
use crate::state::AppState;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
/// `LOG_FORMAT=json` switches to one JSON object per line.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

/// Builds the shared services for `config`.
///
/// # Errors
///
/// Returns an error if the bundled dataset is corrupt or the HTTP client
/// cannot be created. An unusable preferences file is not an error: the
/// in-memory store is used instead.
pub async fn build_state(config: Config) -> Result<AppState> {
    let dataset = LocalDataset::builtin().context("Failed to load bundled college data")?;

    let source: Arc<dyn CollegeSource> = if config.is_offline() {
        tracing::info!("Offline mode: searches use bundled data only");
        Arc::new(OfflineSource::new())
    } else {
        let http =
            HttpCollegeSource::new(&config.api_url, config.request_timeout(), config.api_mode)
                .context("Failed to set up the backend client")?;
        Arc::new(http)
    };

    let store: Arc<dyn PreferenceStore> =
        match FilePreferenceStore::open(&config.preferences_path).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!("{}. Preferences will not be saved.", e);
                Arc::new(MemoryPreferenceStore::new())
            }
        };

    let preferences = PreferenceService::load(store).await;
    let search = SearchService::new(source, dataset);

    Ok(AppState::new(config, Arc::new(search), Arc::new(preferences)))
}
