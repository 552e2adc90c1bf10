//! Error taxonomy shared across the pipeline

use gaap_telemetry::ErrorLog;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GaapError {
    #[error("no config file at {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("failed to load config from {}: {reason}", .path.display())]
    ConfigMalformed { path: PathBuf, reason: String },

    #[error("api key {0} did not resolve")]
    SecretUnresolved(String),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Protocol(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    CacheCorrupt(String),

    #[error("{0}")]
    TranscriptMalformed(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GaapError>;

impl GaapError {
    /// Stable name written to the error log
    pub fn kind(&self) -> &'static str {
        match self {
            GaapError::ConfigMissing(_) => "ConfigMissing",
            GaapError::ConfigMalformed { .. } => "ConfigMalformed",
            GaapError::SecretUnresolved(_) => "SecretUnresolved",
            GaapError::Transport(_) => "TransportError",
            GaapError::Protocol(_) => "ProtocolError",
            GaapError::Auth(_) => "AuthError",
            GaapError::CacheCorrupt(_) => "CacheCorrupt",
            GaapError::TranscriptMalformed(_) => "TranscriptMalformed",
            GaapError::Io(_) => "IoError",
        }
    }

    /// Append this error to the log under `component`
    pub fn record(&self, log: &ErrorLog, component: &str, message: &str) {
        tracing::debug!(component, kind = self.kind(), error = %self, "{}", message);
        log.record_error(component, message, self.kind(), self);
    }
}
