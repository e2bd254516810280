use std::sync::Arc;

use crate::application::services::{PreferenceService, SearchService};
use crate::application::session::SearchSession;
use crate::config::Config;
use crate::domain::repositories::{CollegeSource, PreferenceStore};

/// Services shared by every command of one process.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub search: Arc<SearchService<dyn CollegeSource>>,
    pub preferences: Arc<PreferenceService<dyn PreferenceStore>>,
}

impl AppState {
    pub fn new(
        config: Config,
        search: Arc<SearchService<dyn CollegeSource>>,
        preferences: Arc<PreferenceService<dyn PreferenceStore>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            search,
            preferences,
        }
    }

    /// Starts a fresh search session using the configured debounce window.
    pub fn session(&self) -> SearchSession<dyn CollegeSource> {
        SearchSession::new(Arc::clone(&self.search), self.config.debounce())
    }
}
