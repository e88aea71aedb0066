//! Remote config from a GitHub gist
//!
//! Only one fetch is ever in flight. Starting another aborts the pending
//! one, and a result that arrives for anything but the latest fetch is
//! discarded, so an older gist can never overwrite a newer import.

use parking_lot::Mutex;
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use url::Url;

use taab_storage::SettingsStore;

use crate::config::Config;
use crate::error::CoreError;
use crate::message::Message;
use crate::outcome::Outcome;
use crate::taab::SharedTaab;
use crate::Result;

#[derive(Debug, Deserialize)]
struct GistResponse {
    #[serde(default)]
    files: BTreeMap<String, GistFile>,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    #[serde(default)]
    content: String,
}

/// The content of the only file in a gist API response.
pub fn parse_gist_content(body: &str) -> Result<String> {
    let gist: GistResponse = serde_json::from_str(body)?;
    if gist.files.len() > 1 {
        return Err(CoreError::AmbiguousGist(gist.files.len()));
    }

    gist.files
        .into_values()
        .next()
        .map(|file| file.content)
        .ok_or_else(|| CoreError::Remote("gist has no files".to_string()))
}

#[derive(Debug, Clone)]
pub struct GistClient {
    client: reqwest::Client,
    api_base: Url,
}

impl GistClient {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(3))
            .timeout(timeout)
            .user_agent(concat!("taab/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_client(api_base, client)
    }

    pub(crate) fn with_client(api_base: &str, client: reqwest::Client) -> Result<Self> {
        let api_base = Url::parse(api_base)?;
        Ok(Self { client, api_base })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.gist_api_base, config.fetch_timeout())
    }

    pub fn gist_url(&self, gist_id: &str) -> String {
        format!(
            "{}/gists/{}",
            self.api_base.as_str().trim_end_matches('/'),
            gist_id
        )
    }

    pub async fn fetch(&self, gist_id: &str) -> Result<String> {
        let url = self.gist_url(gist_id);
        tracing::info!(url = %url, "Fetching gist");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Remote(format!("{url} returned {status}")));
        }

        let body = response.text().await?;
        parse_gist_content(&body)
    }
}

/// Single in-flight task slot
#[derive(Debug, Default)]
pub struct FetchSlot {
    generation: AtomicU64,
    current: Mutex<Option<JoinHandle<()>>>,
}

impl FetchSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort whatever is pending and spawn `task` with a fresh generation,
    /// which is returned.
    pub fn start<F, Fut>(&self, task: F) -> u64
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut current = self.current.lock();
        if let Some(previous) = current.take() {
            if !previous.is_finished() {
                tracing::debug!("Aborting pending fetch");
            }
            previous.abort();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *current = Some(tokio::spawn(task(generation)));
        generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    pub fn is_pending(&self) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.current.lock().take() {
            handle.abort();
        }
    }
}

fn fetch_error_message(error: &CoreError) -> Message {
    match error {
        CoreError::AmbiguousGist(_) => Message::new(
            "Error: Multiple files found in gist. Please use a gist with only one file.",
            8000,
        ),
        other => Message::new(format!("Error fetching gist: {other}"), 8000),
    }
}

/// Fetches gists and applies them to a shared [`crate::Taab`].
pub struct RemoteConfigLoader {
    client: GistClient,
    slot: Arc<FetchSlot>,
}

impl RemoteConfigLoader {
    pub fn new(client: GistClient) -> Self {
        Self {
            client,
            slot: Arc::new(FetchSlot::new()),
        }
    }

    pub fn slot(&self) -> &FetchSlot {
        &self.slot
    }

    /// Fetch `gist_id` in the background. The resulting outcome is applied
    /// to `taab` and sent on `outcomes`.
    pub fn start<S>(
        &self,
        gist_id: String,
        taab: SharedTaab<S>,
        outcomes: mpsc::UnboundedSender<Outcome>,
    ) -> u64
    where
        S: SettingsStore + Send + 'static,
    {
        let client = self.client.clone();
        let slot = Arc::clone(&self.slot);

        self.slot.start(move |generation| async move {
            let result = client.fetch(&gist_id).await;

            let outcome = {
                // checked under the lock, a newer fetch cannot land in between
                let mut taab = taab.lock();
                if !slot.is_current(generation) {
                    tracing::debug!(gist_id = %gist_id, generation, "Discarding stale fetch");
                    return;
                }
                match result {
                    Ok(content) => taab.import_remote(&gist_id, &content),
                    Err(e) => {
                        tracing::warn!(gist_id = %gist_id, error = %e, "Gist fetch failed");
                        let message = fetch_error_message(&e);
                        taab.show_message(message.clone());
                        Outcome::Message(message)
                    }
                }
            };

            if outcomes.send(outcome).is_err() {
                tracing::debug!("Outcome receiver closed");
            }
        })
    }
}
