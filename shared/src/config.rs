use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::level::Level;
use crate::validation::ValidationRules;
use crate::{DEFAULT_DIALOG_TITLE, DEFAULT_FETCH_ON_EMPTY_SELECTION, DEFAULT_RELOAD_COUNTRIES_AFTER_SUBMIT};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid config: {reason}")]
    Parse { reason: String },

    #[error("dialog title cannot be empty")]
    EmptyDialogTitle,

    #[error("no validation rule for level {level}")]
    MissingRule { level: Level },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Re-fetch the country list once a submission has reset the form.
    pub reload_countries_after_submit: bool,
    /// Issue a fetch even when the selected value is empty.
    pub fetch_on_empty_selection: bool,
    pub dialog_title: String,
    pub rules: ValidationRules,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            reload_countries_after_submit: DEFAULT_RELOAD_COUNTRIES_AFTER_SUBMIT,
            fetch_on_empty_selection: DEFAULT_FETCH_ON_EMPTY_SELECTION,
            dialog_title: DEFAULT_DIALOG_TITLE.to_string(),
            rules: ValidationRules::default(),
        }
    }
}

impl SelectorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dialog_title.trim().is_empty() {
            return Err(ConfigError::EmptyDialogTitle);
        }
        if let Some(level) = self.rules.missing_levels().into_iter().next() {
            return Err(ConfigError::MissingRule { level });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_reload_after_submit(mut self, reload: bool) -> Self {
        self.reload_countries_after_submit = reload;
        self
    }

    #[must_use]
    pub fn with_fetch_on_empty(mut self, fetch: bool) -> Self {
        self.fetch_on_empty_selection = fetch;
        self
    }
}
