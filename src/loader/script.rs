//! Local-file loading strategy.
//!
//! A local resource is a script that assigns its JSON to a payload slot.
//! Loading mimics script injection: a background task runs the script and
//! fills a one-shot slot, while the loader waits a fixed delay and then looks
//! into the slot. Nothing signals that the script has finished, so a slow
//! read simply counts as a missing payload. Raising
//! `localFilePollAttempts` gives slow disks more chances.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use tokio::sync::oneshot::{
    self,
    error::TryRecvError,
};

use super::{
    LoadError,
    ResourceSource,
    payload,
};
use crate::config::LoaderSettings;
use crate::input::translation::TranslationNode;
use crate::types::ResourceLocation;

/// Loads script files from the local file system.
#[derive(Debug, Clone)]
pub struct ScriptSource {
    /// Wait before each look into the payload slot.
    poll_delay: Duration,
    /// Number of looks before giving up; at least 1.
    poll_attempts: u32,
    /// Assignment the script must perform.
    payload_prefix: String,
}

impl ScriptSource {
    #[must_use]
    pub fn new(settings: &LoaderSettings) -> Self {
        Self {
            poll_delay: settings.local_file_poll_delay(),
            poll_attempts: settings.local_file_poll_attempts.max(1),
            payload_prefix: settings.payload_prefix.clone(),
        }
    }
}

impl ResourceSource for ScriptSource {
    async fn fetch(&self, location: &ResourceLocation) -> Result<TranslationNode, LoadError> {
        tracing::debug!(%location, "Trying to load data from file");

        let (slot_tx, mut slot_rx) = oneshot::channel();
        tokio::spawn(run_script(
            script_path(location),
            self.payload_prefix.clone(),
            slot_tx,
        ));

        for attempt in 1..=self.poll_attempts {
            tokio::time::sleep(self.poll_delay).await;
            match slot_rx.try_recv() {
                Ok(node) => return Ok(node),
                Err(TryRecvError::Empty) => {
                    tracing::debug!(%location, attempt, "Payload slot still empty");
                }
                Err(TryRecvError::Closed) => {
                    return Err(LoadError::parse(location, "script did not provide a payload"));
                }
            }
        }

        Err(LoadError::parse(
            location,
            format!("no payload after waiting {:?} x{}", self.poll_delay, self.poll_attempts),
        ))
    }
}

/// File system path of a script location; `file://` URLs are decoded.
fn script_path(location: &ResourceLocation) -> PathBuf {
    let raw = location.as_str();
    let is_file_url = raw.get(..7).is_some_and(|scheme| scheme.eq_ignore_ascii_case("file://"));
    if is_file_url
        && let Ok(url) = Url::parse(raw)
        && let Ok(path) = url.to_file_path()
    {
        return path;
    }
    PathBuf::from(raw)
}

/// Runs the script at `path` and publishes its payload into `slot`.
///
/// A script that cannot be read, does not assign the slot, or holds invalid
/// JSON leaves the slot empty.
async fn run_script(path: PathBuf, prefix: String, slot: oneshot::Sender<TranslationNode>) {
    let script = match tokio::fs::read_to_string(&path).await {
        Ok(script) => script,
        Err(e) => {
            tracing::debug!("Failed to read script {:?}: {}", path, e);
            return;
        }
    };

    let Some(assignment) = payload::script_assignment(&script, &prefix) else {
        tracing::debug!("Script {:?} does not assign the payload", path);
        return;
    };

    match payload::parse_payload(assignment) {
        Ok(node) => {
            // The loader may have stopped waiting already.
            let _ = slot.send(node);
        }
        Err(e) => tracing::warn!("Script {:?} holds invalid JSON: {}", path, e),
    }
}
