//! Initial language selection.
//!
//! # Priority
//! 0. a caller request for `base` always loads the base resource
//! 1. configured override (pinned for the resolver's lifetime)
//! 2. caller-supplied code
//! 3. the environment's user locale
//!
//! The first non-blank candidate wins. When none is available the base
//! resource is used.

use crate::types::Candidate;

/// Source of the user's locale.
pub trait LocaleProvider: Send + Sync {
    /// Locale reported by the environment, e.g. `de-DE`.
    fn user_locale(&self) -> Option<String>;
}

/// Reads the operating system locale via `sys-locale`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocale;

impl LocaleProvider for SystemLocale {
    fn user_locale(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// A fixed locale, for embedders that already know it.
#[derive(Debug, Clone, Default)]
pub struct FixedLocale(pub Option<String>);

impl LocaleProvider for FixedLocale {
    fn user_locale(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Picks the first language candidate of a load.
#[derive(Debug)]
pub struct LanguageResolver<L> {
    /// Pinned code; wins over everything else.
    language_override: Option<String>,
    /// Environment locale lookup.
    locale: L,
}

impl<L: LocaleProvider> LanguageResolver<L> {
    #[must_use]
    pub const fn new(language_override: Option<String>, locale: L) -> Self {
        Self { language_override, locale }
    }

    /// Resolve the candidate for a load request.
    #[must_use]
    pub fn resolve(&self, requested: Option<&str>) -> Candidate {
        let requested = non_blank(requested);
        if let Some(code) = requested
            && Candidate::from_code(code) == Candidate::Base
        {
            return Candidate::Base;
        }

        if let Some(code) = non_blank(self.language_override.as_deref()) {
            tracing::debug!(code, "Using language override");
            return Candidate::from_code(code);
        }

        if let Some(code) = requested {
            return Candidate::from_code(code);
        }

        let detected = self.locale.user_locale();
        if let Some(code) = non_blank(detected.as_deref()) {
            tracing::debug!(code, "Using detected user locale");
            return Candidate::from_code(code);
        }

        tracing::warn!("No language could be determined; loading the base resource");
        Candidate::Base
    }
}

/// Trimmed value, or `None` if blank.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
