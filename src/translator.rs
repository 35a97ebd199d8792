//! Public entry point: load translations for a language.
//!
//! A load resolves the first candidate, then walks the fallback cascade one
//! resource at a time until a resource yields translations or the base
//! resource has failed too.

use std::sync::Arc;

use crate::cascade::{
    Cascade,
    CascadeState,
};
use crate::config::LoaderSettings;
use crate::holder::MessageHolder;
use crate::loader::{
    LoadError,
    ResourceSource,
    Source,
};
use crate::resolver::{
    LanguageResolver,
    LocaleProvider,
    SystemLocale,
};
use crate::types::{
    Candidate,
    ResourceLocation,
};

/// What to load: `<base_path><filename>[_<language>]<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Requested language; `None` or blank means "detect".
    pub language: Option<String>,
    pub base_path: String,
    pub filename: String,
    pub extension: String,
}

impl LoadRequest {
    #[must_use]
    pub fn new(base_path: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            language: None,
            base_path: base_path.into(),
            filename: filename.into(),
            extension: String::new(),
        }
    }

    /// Request built from the configured path, file name and extension.
    #[must_use]
    pub fn from_settings(settings: &LoaderSettings) -> Self {
        Self::new(settings.languages_rel_path.clone(), settings.languages_filename.clone())
            .with_extension(settings.languages_file_ext.clone())
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Rejects blank paths and file names; a blank extension becomes empty.
    fn validated(mut self) -> Result<Self, LoadError> {
        if self.base_path.trim().is_empty() {
            tracing::error!("Invalid language folder relative path");
            return Err(LoadError::InvalidArgument("language folder path is blank".to_string()));
        }
        if self.filename.trim().is_empty() {
            tracing::error!("Invalid language file name");
            return Err(LoadError::InvalidArgument("language file name is blank".to_string()));
        }
        if self.extension.trim().is_empty() {
            self.extension.clear();
        }
        Ok(self)
    }

    /// Resource path for `candidate`.
    fn location(&self, candidate: &Candidate) -> ResourceLocation {
        ResourceLocation::new(&self.base_path, &self.filename, candidate, &self.extension)
    }
}

/// Loads translation resources with language fallback.
#[derive(Debug)]
pub struct Translator<S, L = SystemLocale> {
    /// Strategy shared with spawned cascades.
    source: Arc<S>,
    /// Picks the first candidate of each load.
    resolver: LanguageResolver<L>,
    /// Joins nested keys when flattening.
    key_separator: String,
}

impl Translator<Source, SystemLocale> {
    /// Translator using the configured strategy and the system locale.
    ///
    /// The strategy is chosen once, from `languagesRelPath`.
    #[must_use]
    pub fn from_settings(settings: &LoaderSettings) -> Self {
        let source = Source::detect(settings, &settings.languages_rel_path);
        let resolver = LanguageResolver::new(settings.language_override.clone(), SystemLocale);
        Self::new(source, resolver).with_key_separator(&settings.key_separator)
    }
}

impl<S: ResourceSource, L: LocaleProvider> Translator<S, L> {
    #[must_use]
    pub fn new(source: S, resolver: LanguageResolver<L>) -> Self {
        Self {
            source: Arc::new(source),
            resolver,
            key_separator: crate::input::translation::DEFAULT_KEY_SEPARATOR.to_string(),
        }
    }

    #[must_use]
    pub fn with_key_separator(mut self, separator: &str) -> Self {
        separator.clone_into(&mut self.key_separator);
        self
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Starts loading in the background and returns the holder immediately.
    ///
    /// `on_done` runs exactly once, with `true` when a resource loaded and
    /// `false` when the cascade ran out of candidates. Until then
    /// [`MessageHolder::get_value`] returns empty strings.
    ///
    /// # Errors
    /// [`LoadError::InvalidArgument`] for a blank path or file name, or when
    /// called outside a Tokio runtime. `on_done` is not called in that case.
    pub fn load_translations<F>(
        &self,
        request: LoadRequest,
        on_done: F,
    ) -> Result<MessageHolder, LoadError>
    where
        F: FnOnce(bool) + Send + 'static,
    {
        let request = request.validated()?;
        let runtime = current_runtime()?;

        let first = self.resolver.resolve(request.language.as_deref());
        let holder = MessageHolder::new();

        let source = Arc::clone(&self.source);
        let task_holder = holder.clone();
        let separator = self.key_separator.clone();
        runtime.spawn(async move {
            let loaded =
                run_cascade(source.as_ref(), &task_holder, &request, first, &separator).await;
            on_done(loaded);
        });

        Ok(holder)
    }

    /// Loads and waits for the cascade to finish.
    ///
    /// Check [`MessageHolder::is_loaded`] to see whether any resource loaded.
    /// Must be awaited inside a Tokio runtime, since the sources use Tokio
    /// timers, tasks and reqwest.
    ///
    /// # Errors
    /// [`LoadError::InvalidArgument`] for a blank path or file name, or when
    /// polled outside a Tokio runtime.
    pub async fn load(&self, request: LoadRequest) -> Result<MessageHolder, LoadError> {
        let request = request.validated()?;
        current_runtime()?;
        let first = self.resolver.resolve(request.language.as_deref());
        let holder = MessageHolder::new();

        run_cascade(self.source.as_ref(), &holder, &request, first, &self.key_separator).await;

        Ok(holder)
    }
}

/// Handle of the Tokio runtime the caller is running on.
fn current_runtime() -> Result<tokio::runtime::Handle, LoadError> {
    tokio::runtime::Handle::try_current().map_err(|e| {
        tracing::error!("No async runtime to load translations on: {}", e);
        LoadError::InvalidArgument(format!("no Tokio runtime: {e}"))
    })
}

/// Walks the cascade from `first`, filling `holder`. Returns whether a
/// resource loaded.
async fn run_cascade<S: ResourceSource>(
    source: &S,
    holder: &MessageHolder,
    request: &LoadRequest,
    first: Candidate,
    separator: &str,
) -> bool {
    let mut cascade = Cascade::new(first);

    while let Some(candidate) = cascade.current().cloned() {
        let location = request.location(&candidate);
        match load_resource(source, holder, &location, separator).await {
            Ok(count) => {
                tracing::info!(%location, count, "Successfully loaded file");
                cascade.succeed();
            }
            Err(err) => {
                tracing::warn!(%location, "Failed to load file: {}", err);
                cascade.fail();
            }
        }
    }

    let loaded = matches!(cascade.state(), CascadeState::Success);
    if !loaded {
        tracing::warn!(attempts = ?cascade.attempts(), "No translation file could be loaded");
    }
    holder.set_loaded(loaded);
    loaded
}

/// Fetches one resource into `holder`.
async fn load_resource<S: ResourceSource>(
    source: &S,
    holder: &MessageHolder,
    location: &ResourceLocation,
    separator: &str,
) -> Result<usize, LoadError> {
    let node = source.fetch(location).await?;
    match holder.absorb(&node, separator) {
        0 => Err(LoadError::empty(location)),
        count => Ok(count),
    }
}
