//! Network loading strategy.

use reqwest::{
    Client,
    StatusCode,
    Url,
};

use super::{
    LoadError,
    ResourceSource,
    payload,
};
use crate::config::LoaderSettings;
use crate::input::translation::TranslationNode;
use crate::types::ResourceLocation;

/// Query parameter carrying the cache-busting timestamp.
const CACHE_BUST_PARAM: &str = "newRequest";

/// Fetches resources with HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    /// Shared connection pool.
    client: Client,
    /// Append [`CACHE_BUST_PARAM`] to every request.
    cache_bust: bool,
    /// Assignment prefix stripped from response bodies.
    payload_prefix: String,
}

impl HttpSource {
    #[must_use]
    pub fn new(settings: &LoaderSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    /// Uses a preconfigured client (timeouts, proxies, headers).
    #[must_use]
    pub fn with_client(client: Client, settings: &LoaderSettings) -> Self {
        Self {
            client,
            cache_bust: settings.cache_bust,
            payload_prefix: settings.payload_prefix.clone(),
        }
    }

    /// The URL requested for `location`.
    ///
    /// # Errors
    /// Returns [`LoadError::FetchFailure`] when the location is not a URL.
    pub fn request_url(&self, location: &ResourceLocation) -> Result<Url, LoadError> {
        let mut url = Url::parse(location.as_str())
            .map_err(|e| LoadError::fetch(location, format!("invalid URL: {e}")))?;
        if self.cache_bust {
            let stamp = chrono::Utc::now().timestamp_millis().to_string();
            url.query_pairs_mut().append_pair(CACHE_BUST_PARAM, &stamp);
        }
        Ok(url)
    }
}

impl ResourceSource for HttpSource {
    async fn fetch(&self, location: &ResourceLocation) -> Result<TranslationNode, LoadError> {
        let url = self.request_url(location)?;
        tracing::debug!(%url, "Requesting translation file");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::fetch(location, e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LoadError::fetch(location, format!("server returned {status}")));
        }

        let body = response.text().await.map_err(|e| LoadError::fetch(location, e.to_string()))?;
        if body.trim().is_empty() {
            return Err(LoadError::fetch(location, "response body is empty"));
        }

        let json = payload::strip_payload_prefix(&body, &self.payload_prefix);
        payload::parse_payload(json).map_err(|e| LoadError::parse(location, e.to_string()))
    }
}
