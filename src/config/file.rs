//! `.js-talks.json` discovery and layering.
//!
//! Settings come from three layers, lowest first: built-in defaults, the
//! project's settings file, then [`SettingsOverrides`] (the CLI flags).
//! Validation runs once, on the merged result.

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    LoaderSettings,
};

/// Settings file looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = ".js-talks.json";

/// Values that win over the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub languages_rel_path: Option<String>,
    pub languages_filename: Option<String>,
    pub languages_file_ext: Option<String>,
}

impl SettingsOverrides {
    /// Writes every present value into `settings`.
    fn apply(self, settings: &mut LoaderSettings) {
        if let Some(path) = self.languages_rel_path {
            settings.languages_rel_path = path;
        }
        if let Some(filename) = self.languages_filename {
            settings.languages_filename = filename;
        }
        if let Some(ext) = self.languages_file_ext {
            settings.languages_file_ext = ext;
        }
    }
}

impl LoaderSettings {
    /// Settings for the project in `project_dir`, with `overrides` on top.
    ///
    /// A missing settings file means defaults. The merged settings are
    /// validated, so an override can repair a bad file value and vice versa.
    ///
    /// # Errors
    /// Unreadable or malformed settings file, or failed validation.
    pub fn from_project_dir(
        project_dir: &Path,
        overrides: SettingsOverrides,
    ) -> Result<Self, ConfigError> {
        let mut settings = read_settings_file(&project_dir.join(CONFIG_FILE_NAME))?
            .unwrap_or_default();
        overrides.apply(&mut settings);

        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!("Effective settings: {:?}", settings);
        Ok(settings)
    }
}

/// Parses the file at `path`; `None` when it does not exist.
fn read_settings_file(path: &Path) -> Result<Option<LoaderSettings>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No settings file at {:?}", path);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!("Reading settings from {:?}", path);
    Ok(Some(serde_json::from_str(&content)?))
}
