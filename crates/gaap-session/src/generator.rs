//! Title generation: cache first, then the remote summarizer, then a folder-based fallback

use gaap_compress::{title_prompt, SummaryRequest, Summarizer};
use gaap_core::{ConfigResolver, GaapError, Result};
use gaap_telemetry::ErrorLog;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::SessionTitleCache;
use crate::digest::{content_hash, fallback_title};
use crate::transcript::{first_user_message, session_id};

pub const TITLE_MAX_TOKENS: u32 = 50;
pub const TITLE_TIMEOUT: Duration = Duration::from_secs(15);

const COMPONENT: &str = "session_title";
const QUOTES: [char; 6] = ['"', '\'', '“', '”', '‘', '’'];

/// Names a session after its first user message, with caching and a
/// folder-based fallback
pub struct TitleGenerator {
    resolver: ConfigResolver,
    summarizer: Arc<dyn Summarizer>,
    cache: SessionTitleCache,
    log: ErrorLog,
}

impl TitleGenerator {
    pub fn new(
        resolver: ConfigResolver,
        summarizer: Arc<dyn Summarizer>,
        cache: SessionTitleCache,
        log: ErrorLog,
    ) -> Self {
        Self {
            resolver,
            summarizer,
            cache,
            log,
        }
    }

    /// Always produces a title; failures end up in the error log
    pub async fn generate(&self, transcript: &Path, cwd: &str) -> String {
        if !transcript.exists() {
            tracing::debug!(path = %transcript.display(), "transcript missing, using fallback title");
            return fallback_title(cwd);
        }

        let session_id = session_id(transcript);
        let first_message = match first_user_message(transcript) {
            Ok(message) => message,
            Err(e) => {
                e.record(
                    &self.log,
                    COMPONENT,
                    &format!("Failed to extract message from {}", transcript.display()),
                );
                None
            }
        };
        let hash = content_hash(first_message.as_deref());

        match self.cache.lookup(&session_id, &hash) {
            Ok(Some(title)) => return title,
            Ok(None) => {}
            Err(e) => e.record(&self.log, COMPONENT, "Failed to load session title cache"),
        }

        let remote = match first_message.as_deref() {
            Some(message) => match self.remote_title(message).await {
                Ok(title) => title,
                Err(e) => {
                    e.record(
                        &self.log,
                        COMPONENT,
                        &format!("API error generating title for session {}", session_id),
                    );
                    None
                }
            },
            None => None,
        };
        let title = remote.unwrap_or_else(|| fallback_title(cwd));

        if let Err(e) = self.cache.store(&session_id, &hash, &title) {
            e.record(&self.log, COMPONENT, "Failed to save session title cache");
        }
        title
    }

    /// One remote attempt; `Ok(None)` when the config does not allow it
    pub async fn remote_title(&self, first_message: &str) -> Result<Option<String>> {
        let Some(config) = self.resolver.resolve() else {
            return Ok(None);
        };
        if !config.mode.allows_remote() {
            return Ok(None);
        }
        let Some(api_key) = config.api_key() else {
            tracing::debug!("no api key resolved, skipping remote title");
            return Ok(None);
        };

        let request = SummaryRequest::from_config(
            &config,
            Some(api_key.as_str()),
            title_prompt(config.language),
            first_message,
            TITLE_MAX_TOKENS,
            TITLE_TIMEOUT,
        );
        let raw = self.summarizer.summarize(&request).await?;
        let title = clean_title(&raw);
        if title.is_empty() {
            return Err(GaapError::Protocol(format!(
                "title response was only quotes: {:?}",
                raw
            )));
        }
        Ok(Some(title))
    }
}

/// Trim and drop one surrounding quote on each side
pub fn clean_title(raw: &str) -> String {
    let mut title = raw.trim();
    if let Some(rest) = title.strip_prefix(QUOTES) {
        title = rest;
    }
    if let Some(rest) = title.strip_suffix(QUOTES) {
        title = rest;
    }
    title.trim().to_string()
}
