//! Core types used throughout the project.

use std::fmt;

/// Reserved code for the unsuffixed default resource.
pub const BASE_SENTINEL: &str = "base";

/// A language candidate the loader can try.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Candidate {
    /// The unsuffixed default resource (e.g. `constants.js`).
    Base,
    /// A concrete language code such as `de`, `en-US` or `pt_BR`.
    Language(String),
}

impl Candidate {
    /// Builds a candidate from a raw code.
    ///
    /// Blank input and the `base` sentinel (any case) both map to [`Candidate::Base`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let trimmed = code.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(BASE_SENTINEL) {
            Self::Base
        } else {
            Self::Language(trimmed.to_string())
        }
    }

    /// The language code, or `None` for the base resource.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Base => None,
            Self::Language(code) => Some(code),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str(BASE_SENTINEL),
            Self::Language(code) => f.write_str(code),
        }
    }
}

/// Where a translation resource lives: `<relPath><filename>[_<code>]<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation {
    /// Full path or URL of the resource.
    path: String,
}

impl ResourceLocation {
    #[must_use]
    pub fn new(base_path: &str, filename: &str, candidate: &Candidate, extension: &str) -> Self {
        let path = candidate.code().map_or_else(
            || format!("{base_path}{filename}{extension}"),
            |code| format!("{base_path}{filename}_{code}{extension}"),
        );
        Self { path }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
