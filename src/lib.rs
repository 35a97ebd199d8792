//! talks-i18n
//!
//! Translation loader: picks a language, fetches the matching resource with
//! region and base-language fallback, and flattens its nested JSON into a
//! case-insensitive lookup table.

pub mod cascade;
pub mod config;
pub mod holder;
pub mod input;
pub mod loader;
pub mod resolver;
#[cfg(test)]
mod test_utils;
pub mod translator;
pub mod types;

pub use holder::MessageHolder;
pub use loader::LoadError;
pub use translator::{
    LoadRequest,
    Translator,
};

/// Application name.
pub const APP_NAME: &str = "JsTalks";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
