//! Loader configuration read from `.js-talks.json`.
/// Settings file lookup and layering
mod file;
/// Configuration types and settings
mod types;

pub use file::{
    CONFIG_FILE_NAME,
    SettingsOverrides,
};
pub use types::{
    ConfigError,
    DEFAULT_PAYLOAD_PREFIX,
    LoadStrategy,
    LoaderSettings,
    ValidationError,
};
