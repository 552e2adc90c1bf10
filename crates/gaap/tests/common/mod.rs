#![allow(dead_code)]

use async_trait::async_trait;
use gaap_compress::{SummaryRequest, Summarizer};
use gaap_core::{ConfigResolver, GaapError, Result};
use gaap_session::{SessionTitleCache, TitleGenerator};
use gaap_telemetry::{ErrorLog, ManualClock, Paths};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Summarizer double that counts calls and answers with a fixed reply
pub struct CountingSummarizer {
    calls: AtomicUsize,
    reply: Option<String>,
}

impl CountingSummarizer {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: Some(reply.to_string()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: None,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for CountingSummarizer {
    async fn summarize(&self, _request: &SummaryRequest<'_>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(GaapError::Transport("connection refused".into())),
        }
    }
}

/// Isolated project root with its own `.claude` directory
pub struct Project {
    pub dir: tempfile::TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: tempfile::TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> Paths {
        Paths::for_project(self.root())
    }

    pub fn write_config(&self, body: &str) {
        let path = self.paths().config_file();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    /// Transcript whose first meaningful user turn is `first_message`
    pub fn write_transcript(&self, session_id: &str, first_message: &str) -> PathBuf {
        let path = self.root().join(format!("{}.jsonl", session_id));
        let lines = [
            serde_json::json!({"type": "user", "message": {"content": "<command-name>/clear</command-name>"}}),
            serde_json::json!({"type": "user", "message": {"content": first_message}}),
            serde_json::json!({"type": "assistant", "message": {"content": "On it."}}),
        ];
        let body: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        std::fs::write(&path, body.join("\n")).unwrap();
        path
    }

    pub fn error_log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(self.paths().error_log())
            .map(|c| c.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn generator(&self, summarizer: Arc<dyn Summarizer>, clock: Arc<ManualClock>) -> TitleGenerator {
        let paths = self.paths();
        let log = ErrorLog::new(paths.error_log());
        let cache = SessionTitleCache::new(paths.cache_file(), clock);
        TitleGenerator::new(ConfigResolver::new(paths, log.clone()), summarizer, cache, log)
    }

    /// The `gaap` binary rooted at this project, isolated from the caller's
    /// home directory and proxy settings
    pub fn gaap(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gaap"));
        cmd.env("GAAP_PROJECT_DIR", self.root())
            .env("HOME", self.root())
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env_remove("RUST_LOG");
        for var in [
            "HTTP_PROXY",
            "HTTPS_PROXY",
            "ALL_PROXY",
            "http_proxy",
            "https_proxy",
            "all_proxy",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }
}

/// Run the binary with `stdin` piped in
pub fn run_with_stdin(cmd: Command, stdin: &str) -> Output {
    run_with_stdin_bytes(cmd, stdin.as_bytes())
}

pub fn run_with_stdin_bytes(mut cmd: Command, stdin: &[u8]) -> Output {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin)
        .unwrap();
    child.wait_with_output().unwrap()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
