//! Provider configuration, API key resolution and the error taxonomy

mod config;
mod error;
mod secret;

pub use config::{
    parse_config, read_config_file, CompressSection, ConfigFile, ConfigResolver, Language,
    LlmMode, MessageFormat, Mode, Provider, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use error::{GaapError, Result};
pub use secret::{resolve_secret, resolve_secret_with, SecretRef};
