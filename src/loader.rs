//! Resource loading strategies.

/// Load error type
mod error;
pub mod http;
pub mod payload;
pub mod script;

use std::future::Future;

pub use error::LoadError;
pub use http::HttpSource;
pub use script::ScriptSource;

use crate::config::{
    LoadStrategy,
    LoaderSettings,
};
use crate::input::translation::TranslationNode;
use crate::types::ResourceLocation;

/// Fetches and parses one translation resource.
pub trait ResourceSource: Send + Sync + 'static {
    /// Loads the resource at `location`.
    ///
    /// Every error is recoverable: the cascade moves on to the next candidate.
    fn fetch(
        &self,
        location: &ResourceLocation,
    ) -> impl Future<Output = Result<TranslationNode, LoadError>> + Send;
}

/// Strategy picked once from the settings and the address being served.
#[derive(Debug, Clone)]
pub enum Source {
    Network(HttpSource),
    LocalFile(ScriptSource),
}

impl Source {
    /// Picks the strategy for resources under `address`.
    ///
    /// With [`LoadStrategy::Auto`], `http://` and `https://` addresses use the
    /// network and everything else is read as local script files.
    #[must_use]
    pub fn detect(settings: &LoaderSettings, address: &str) -> Self {
        let network = match settings.strategy {
            LoadStrategy::Auto => is_network_address(address),
            LoadStrategy::Network => true,
            LoadStrategy::LocalFile => false,
        };
        tracing::debug!(address, network, "Selected loading strategy");

        if network {
            Self::Network(HttpSource::new(settings))
        } else {
            Self::LocalFile(ScriptSource::new(settings))
        }
    }
}

impl ResourceSource for Source {
    async fn fetch(&self, location: &ResourceLocation) -> Result<TranslationNode, LoadError> {
        match self {
            Self::Network(source) => source.fetch(location).await,
            Self::LocalFile(source) => source.fetch(location).await,
        }
    }
}

/// Whether `address` uses a network protocol scheme.
#[must_use]
pub fn is_network_address(address: &str) -> bool {
    let address = address.trim().to_ascii_lowercase();
    address.starts_with("http://") || address.starts_with("https://")
}
