//! Shared helpers for unit tests.
#![cfg(test)]

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;

use crate::input::translation::TranslationNode;
use crate::loader::{
    LoadError,
    ResourceSource,
};
use crate::types::ResourceLocation;

/// A resource served by [`FakeSource`].
#[derive(Debug, Clone)]
pub(crate) enum FakeResource {
    Json(Value),
    /// Body that is not valid JSON.
    Broken,
}

/// In-memory resource source that records every path it was asked for.
#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    /// Resources by path; anything else is a fetch failure.
    resources: HashMap<String, FakeResource>,
    /// Paths fetched, in order.
    requested: Mutex<Vec<String>>,
    /// Simulated latency per fetch.
    delay: Option<Duration>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_json(mut self, path: &str, json: Value) -> Self {
        self.resources.insert(path.to_string(), FakeResource::Json(json));
        self
    }

    pub(crate) fn with_broken(mut self, path: &str) -> Self {
        self.resources.insert(path.to_string(), FakeResource::Broken);
        self
    }

    pub(crate) const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

impl ResourceSource for FakeSource {
    async fn fetch(&self, location: &ResourceLocation) -> Result<TranslationNode, LoadError> {
        self.requested.lock().push(location.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.resources.get(location.as_str()) {
            Some(FakeResource::Json(json)) => Ok(TranslationNode::from(json)),
            Some(FakeResource::Broken) => Err(LoadError::parse(location, "malformed JSON")),
            None => Err(LoadError::fetch(location, "server returned 404 Not Found")),
        }
    }
}
