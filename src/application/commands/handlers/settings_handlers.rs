//! Settings Command Handlers

use std::sync::Arc;

use crate::application::commands::UpdateSettings;
use crate::application::error::ApplicationError;
use crate::application::ports::SettingsStorePort;
use crate::domain::ReaderSettings;

/// UpdateSettings Handler - 读取、合并、校验、保存
pub struct UpdateSettingsHandler {
    settings_store: Arc<dyn SettingsStorePort>,
}

impl UpdateSettingsHandler {
    pub fn new(settings_store: Arc<dyn SettingsStorePort>) -> Self {
        Self { settings_store }
    }

    pub fn handle(&self, command: UpdateSettings) -> Result<ReaderSettings, ApplicationError> {
        let current = self.settings_store.load()?;
        let updated = current.merge(&command.patch);
        updated.validate().map_err(ApplicationError::validation)?;

        self.settings_store.save(&updated)?;

        tracing::info!(
            scroll_amount = updated.scroll_amount,
            font_size = updated.font_size,
            line_height = updated.line_height,
            theme = ?updated.theme,
            "Reader settings updated"
        );

        Ok(updated)
    }
}
