//! Provider configuration: on-disk schema, normalization and loading

use gaap_telemetry::{ErrorLog, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GaapError, Result};
use crate::secret::SecretRef;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

/// How eagerly the remote summarizer may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Never call the remote service
    Disabled,
    /// Remote calls allowed; the notifier decides which messages to shrink
    Selective,
    /// Shrink every message
    Always,
}

impl Mode {
    pub fn allows_remote(self) -> bool {
        !matches!(self, Mode::Disabled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    /// Unknown codes fall back to Chinese
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            _ => Language::Zh,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }
}

/// Wire dialect of the summarization endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(
        rename = "openai",
        alias = "openai_compatible",
        alias = "openai-compatible"
    )]
    OpenAiCompatible,
}

impl Provider {
    /// Guess the dialect from the endpoint URL
    pub fn detect(base_url: &str) -> Self {
        let url = base_url.to_ascii_lowercase();
        if url.contains("anthropic") {
            Provider::Anthropic
        } else if url.contains("openai") {
            Provider::OpenAiCompatible
        } else {
            Provider::Anthropic
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAiCompatible => "openai",
        }
    }
}

/// `llm_mode` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmMode {
    None,
    Smart,
    CompressAll,
}

/// `message_format` values written by older releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFormat {
    Full,
    Compressed,
}

/// The `compress` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompressSection {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<SecretRef>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub provider: Option<Provider>,
}

/// `gaap.json` as stored on disk.
///
/// Accepts both the current `llm_mode` field and the older `message_format`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_mode: Option<LlmMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_format: Option<MessageFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<CompressSection>,
}

impl ConfigFile {
    pub fn mode(&self) -> Mode {
        match (self.llm_mode, self.message_format) {
            (Some(LlmMode::None), _) => Mode::Disabled,
            (Some(LlmMode::Smart), _) => Mode::Selective,
            (Some(LlmMode::CompressAll), _) => Mode::Always,
            (None, Some(MessageFormat::Compressed)) => Mode::Always,
            (None, Some(MessageFormat::Full)) | (None, None) => Mode::Disabled,
        }
    }
}

/// Normalized provider descriptor, loaded fresh on every invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub endpoint: String,
    pub api_key: Option<SecretRef>,
    pub model: String,
    pub language: Language,
    pub mode: Mode,
}

impl ProviderConfig {
    pub fn from_file(file: ConfigFile) -> Self {
        let mode = file.mode();
        let section = file.compress.unwrap_or_default();

        let endpoint = section
            .base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let provider = section
            .provider
            .unwrap_or_else(|| Provider::detect(&endpoint));
        let model = section
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let language = section
            .lang
            .as_deref()
            .map(Language::from_code)
            .unwrap_or_default();

        Self {
            provider,
            endpoint,
            api_key: section.api_key,
            model,
            language,
            mode,
        }
    }

    /// Resolve the API key now; `None` when unset or unresolvable
    pub fn api_key(&self) -> Option<String> {
        self.api_key.as_ref().and_then(SecretRef::resolve)
    }

    pub fn require_api_key(&self) -> Result<String> {
        match &self.api_key {
            Some(secret) => secret.try_resolve(),
            None => Err(GaapError::SecretUnresolved("<unset>".to_string())),
        }
    }
}

/// Parse a config document
pub fn parse_config(text: &str) -> serde_json::Result<ConfigFile> {
    serde_json::from_str(text)
}

/// Read one config file from disk
pub fn read_config_file(path: &Path) -> Result<ProviderConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GaapError::ConfigMissing(path.to_path_buf())
        } else {
            GaapError::ConfigMalformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    })?;

    let file = parse_config(&content).map_err(|e| GaapError::ConfigMalformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(ProviderConfig::from_file(file))
}

/// Loads `gaap.json` from the project, falling back to `~/.claude`
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    paths: Paths,
    log: ErrorLog,
}

impl ConfigResolver {
    pub fn new(paths: Paths, log: ErrorLog) -> Self {
        Self { paths, log }
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn load(&self) -> Result<ProviderConfig> {
        match self.paths.existing_config_file() {
            Some(path) => read_config_file(&path),
            None => Err(GaapError::ConfigMissing(self.paths.config_file())),
        }
    }

    /// Load the config, treating any failure as "not configured".
    ///
    /// A missing file is normal and only traced; anything else is logged.
    pub fn resolve(&self) -> Option<ProviderConfig> {
        match self.load() {
            Ok(config) => {
                tracing::debug!(
                    provider = config.provider.name(),
                    mode = ?config.mode,
                    model = %config.model,
                    "config resolved"
                );
                Some(config)
            }
            Err(GaapError::ConfigMissing(path)) => {
                tracing::debug!(path = %path.display(), "no config file");
                None
            }
            Err(e) => {
                e.record(&self.log, "config", "Failed to load config");
                None
            }
        }
    }
}
