use thiserror::Error;

use crate::types::ResourceLocation;

/// Errors raised while loading translation resources.
///
/// Only [`LoadError::InvalidArgument`] reaches callers. The other variants
/// make the cascade move on to the next candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Rejected before anything was fetched
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Non-200 response, missing body or unreadable resource
    #[error("Failed to fetch '{location}': {reason}")]
    FetchFailure { location: String, reason: String },
    /// Malformed JSON or no payload where one was expected
    #[error("Failed to parse '{location}': {reason}")]
    ParseFailure { location: String, reason: String },
    /// Valid JSON that produced no translations
    #[error("No translations found in '{location}'")]
    EmptyResource { location: String },
}

impl LoadError {
    /// [`LoadError::FetchFailure`] at `location`.
    pub(crate) fn fetch(location: &ResourceLocation, reason: impl Into<String>) -> Self {
        Self::FetchFailure { location: location.to_string(), reason: reason.into() }
    }

    /// [`LoadError::ParseFailure`] at `location`.
    pub(crate) fn parse(location: &ResourceLocation, reason: impl Into<String>) -> Self {
        Self::ParseFailure { location: location.to_string(), reason: reason.into() }
    }

    /// [`LoadError::EmptyResource`] at `location`.
    pub(crate) fn empty(location: &ResourceLocation) -> Self {
        Self::EmptyResource { location: location.to_string() }
    }
}
