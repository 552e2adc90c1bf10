//! Message compression with fallback to the original text

use gaap_core::{ConfigResolver, Result};
use gaap_telemetry::ErrorLog;
use std::sync::Arc;
use std::time::Duration;

use crate::prompts::compress_prompt;
use crate::summarizer::{SummaryRequest, Summarizer};

pub const COMPRESS_MAX_TOKENS: u32 = 200;
pub const COMPRESS_TIMEOUT: Duration = Duration::from_secs(5);

const COMPONENT: &str = "compress";

/// Shrinks notification messages when the config allows it
pub struct MessageCompressor {
    resolver: ConfigResolver,
    summarizer: Arc<dyn Summarizer>,
    log: ErrorLog,
}

impl MessageCompressor {
    pub fn new(resolver: ConfigResolver, summarizer: Arc<dyn Summarizer>, log: ErrorLog) -> Self {
        Self {
            resolver,
            summarizer,
            log,
        }
    }

    /// `Ok(None)` means the original message should be used as is
    pub async fn try_compress(&self, message: &str) -> Result<Option<String>> {
        let Some(config) = self.resolver.resolve() else {
            return Ok(None);
        };
        if !config.mode.allows_remote() {
            tracing::debug!("compression disabled by config");
            return Ok(None);
        }
        let Some(api_key) = config.api_key() else {
            tracing::debug!("no api key resolved, skipping compression");
            return Ok(None);
        };

        let request = SummaryRequest::from_config(
            &config,
            Some(api_key.as_str()),
            compress_prompt(config.language),
            message,
            COMPRESS_MAX_TOKENS,
            COMPRESS_TIMEOUT,
        );
        let compressed = self.summarizer.summarize(&request).await?;
        Ok(Some(compressed))
    }

    /// Compressed text, or `None` on any failure or when compression is off
    pub async fn compress(&self, message: &str) -> Option<String> {
        match self.try_compress(message).await {
            Ok(compressed) => compressed,
            Err(e) => {
                e.record(
                    &self.log,
                    COMPONENT,
                    "API call failed for message compression",
                );
                None
            }
        }
    }

    /// What the CLI prints: the compressed text or the original
    pub async fn compress_or_original(&self, message: &str) -> String {
        self.compress(message)
            .await
            .unwrap_or_else(|| message.to_string())
    }
}
