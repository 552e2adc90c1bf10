//! Best-effort error log shared by every component

use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::io::append_line;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only, line-oriented failure log.
///
/// Writing never fails from the caller's point of view: if the log file
/// cannot be written the entry is dropped.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a failure without an underlying error
    pub fn record(&self, component: &str, message: &str) {
        self.write(format_entry(component, message, None));
    }

    /// Record a failure with its error kind and detail
    pub fn record_error(&self, component: &str, message: &str, kind: &str, detail: &dyn Display) {
        self.write(format_entry(
            component,
            message,
            Some((kind, detail.to_string())),
        ));
    }

    fn write(&self, line: String) {
        if let Err(e) = append_line(&self.path, &line) {
            tracing::debug!(path = %self.path.display(), error = %e, "error log write dropped");
        }
    }
}

fn format_entry(component: &str, message: &str, cause: Option<(&str, String)>) -> String {
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
    match cause {
        Some((kind, detail)) => format!(
            "[{}] {}: {}: {}: {}",
            timestamp, component, message, kind, detail
        ),
        None => format!("[{}] {}: {}", timestamp, component, message),
    }
}
