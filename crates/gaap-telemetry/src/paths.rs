//! Path resolution for config, cache and error log files

use std::path::{Path, PathBuf};

/// Environment variable naming the project root
pub const PROJECT_DIR_ENV: &str = "GAAP_PROJECT_DIR";

const CONFIG_FILE: &str = "gaap.json";
const CACHE_FILE: &str = ".gaap_session_cache.json";
const ERROR_LOG_FILE: &str = ".gaap_error.log";

/// Resolves the files gaap reads and writes.
///
/// Built once per invocation and handed to every component, so tests can
/// point a whole pipeline at a temporary directory.
#[derive(Debug, Clone)]
pub struct Paths {
    pub project_dir: PathBuf,
    pub home_claude: Option<PathBuf>,
}

impl Paths {
    /// Resolve from `GAAP_PROJECT_DIR` (default `.`) and the user's home directory
    pub fn from_env() -> Self {
        let project_dir = std::env::var_os(PROJECT_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            project_dir,
            home_claude: dirs::home_dir().map(|home| home.join(".claude")),
        }
    }

    /// Paths rooted at `project_dir` with no home fallback
    pub fn for_project(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            home_claude: None,
        }
    }

    /// Project-local `.claude` directory
    pub fn claude_dir(&self) -> PathBuf {
        self.project_dir.join(".claude")
    }

    /// Project-local config file
    pub fn config_file(&self) -> PathBuf {
        self.claude_dir().join(CONFIG_FILE)
    }

    /// Config file from older releases, kept in `~/.claude`
    pub fn legacy_config_file(&self) -> Option<PathBuf> {
        self.home_claude.as_ref().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Session title cache
    pub fn cache_file(&self) -> PathBuf {
        self.claude_dir().join(CACHE_FILE)
    }

    /// Append-only error log
    pub fn error_log(&self) -> PathBuf {
        self.claude_dir().join(ERROR_LOG_FILE)
    }

    /// First config file that exists, project-local before legacy
    pub fn existing_config_file(&self) -> Option<PathBuf> {
        let local = self.config_file();
        if local.exists() {
            return Some(local);
        }
        self.legacy_config_file().filter(|p| Path::new(p).exists())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::from_env()
    }
}
