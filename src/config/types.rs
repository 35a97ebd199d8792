use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::input::translation::DEFAULT_KEY_SEPARATOR;

/// Prefix that lets a resource double as an executable script.
pub const DEFAULT_PAYLOAD_PREFIX: &str = "window.jsTalks.PRIVATE.loadedData = ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "keySeparator")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// How resources are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LoadStrategy {
    /// Network for `http://`/`https://` base paths, local file otherwise.
    #[default]
    Auto,
    Network,
    LocalFile,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderSettings {
    /// Folder holding the language files, including the trailing separator.
    pub languages_rel_path: String,
    /// Stem shared by every language file.
    pub languages_filename: String,
    /// Extension appended after the language suffix. May be empty.
    pub languages_file_ext: String,

    /// Pins the language regardless of what callers or the system ask for.
    pub language_override: Option<String>,

    pub key_separator: String,
    pub payload_prefix: String,

    /// Append a timestamp query parameter to network requests.
    pub cache_bust: bool,
    pub strategy: LoadStrategy,

    /// Wait before inspecting a local script's payload slot.
    pub local_file_poll_delay_ms: u64,
    /// How many times the payload slot is inspected before giving up.
    pub local_file_poll_attempts: u32,
}

impl LoaderSettings {
    #[must_use]
    pub const fn local_file_poll_delay(&self) -> Duration {
        Duration::from_millis(self.local_file_poll_delay_ms)
    }

    /// # Errors
    /// - Required field is empty
    /// - Invalid separator
    /// - Zero poll attempts
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.languages_rel_path.trim().is_empty() {
            errors.push(ValidationError::new(
                "languagesRelPath",
                "The path cannot be empty. Example: \"js/i18n/\"",
            ));
        }

        if self.languages_filename.trim().is_empty() {
            errors.push(ValidationError::new(
                "languagesFilename",
                "The file name cannot be empty. Example: \"constants\"",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \"_\" (underscore)",
            ));
        }

        if let Some(code) = &self.language_override
            && code.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "languageOverride",
                "The language code cannot be blank. Please specify a code (e.g., \"de\"), or remove this field",
            ));
        }

        if self.local_file_poll_attempts == 0 {
            errors.push(ValidationError::new(
                "localFilePollAttempts",
                "At least one attempt is required",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            languages_rel_path: "js/i18n/".to_string(),
            languages_filename: "constants".to_string(),
            languages_file_ext: ".js".to_string(),
            language_override: None,
            key_separator: DEFAULT_KEY_SEPARATOR.to_string(),
            payload_prefix: DEFAULT_PAYLOAD_PREFIX.to_string(),
            cache_bust: true,
            strategy: LoadStrategy::Auto,
            local_file_poll_delay_ms: 100,
            local_file_poll_attempts: 1,
        }
    }
}
