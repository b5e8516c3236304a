//! Settings Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SettingsStorePort;
use crate::application::queries::GetSettings;
use crate::domain::ReaderSettings;

/// GetSettings Handler
pub struct GetSettingsHandler {
    settings_store: Arc<dyn SettingsStorePort>,
}

impl GetSettingsHandler {
    pub fn new(settings_store: Arc<dyn SettingsStorePort>) -> Self {
        Self { settings_store }
    }

    pub fn handle(&self, _query: GetSettings) -> Result<ReaderSettings, ApplicationError> {
        Ok(self.settings_store.load()?)
    }
}
