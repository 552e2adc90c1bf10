pub mod compress;
pub mod status;
pub mod title;
pub mod version;

use async_trait::async_trait;
use gaap_compress::{HttpSummarizer, SummaryRequest, Summarizer};
use gaap_core::{ConfigResolver, GaapError, Result};
use gaap_telemetry::{ErrorLog, Paths};
use std::sync::Arc;

/// Per-invocation wiring shared by the pipeline commands
pub struct Context {
    pub paths: Paths,
    pub log: ErrorLog,
    pub summarizer: Arc<dyn Summarizer>,
}

impl Context {
    pub fn from_env() -> Self {
        let paths = Paths::from_env();
        let log = ErrorLog::new(paths.error_log());
        let summarizer: Arc<dyn Summarizer> = match HttpSummarizer::new() {
            Ok(http) => Arc::new(http),
            Err(e) => {
                tracing::warn!(error = %e, "HTTP client unavailable, remote calls disabled");
                Arc::new(Unavailable(e.to_string()))
            }
        };
        Self {
            paths,
            log,
            summarizer,
        }
    }

    pub fn resolver(&self) -> ConfigResolver {
        ConfigResolver::new(self.paths.clone(), self.log.clone())
    }
}

/// Stands in when no HTTP client could be built; every call fails as a
/// transport error so callers take their usual fallback
struct Unavailable(String);

#[async_trait]
impl Summarizer for Unavailable {
    async fn summarize(&self, _request: &SummaryRequest<'_>) -> Result<String> {
        Err(GaapError::Transport(self.0.clone()))
    }
}

pub fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
