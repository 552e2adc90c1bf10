//! First-message extraction from session transcripts (JSONL)

use gaap_core::{GaapError, Result};
use regex::Regex;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

static TAG_RE: OnceLock<Regex> = OnceLock::new();

/// User turns containing any of these are echoes, not real prompts
const CONTROL_MARKERS: [&str; 4] = [
    "<command-",
    "<local-command-",
    "Login successful",
    "/login",
];

const MIN_MESSAGE_CHARS: usize = 10;
const MAX_MESSAGE_CHARS: usize = 200;

/// Session id is the transcript's file stem
pub fn session_id(transcript: &Path) -> String {
    transcript
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// First meaningful user message, cleaned and truncated to 200 chars.
///
/// `Ok(None)` when the transcript has no qualifying user turn.
pub fn first_user_message(transcript: &Path) -> Result<Option<String>> {
    let file = File::open(transcript)?;
    let reader = BufReader::new(file);

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: Value = serde_json::from_str(&line).map_err(|e| {
            GaapError::TranscriptMalformed(format!("line {}: {}", index + 1, e))
        })?;
        if let Some(message) = meaningful_user_text(&record) {
            return Ok(Some(message));
        }
    }

    Ok(None)
}

fn meaningful_user_text(record: &Value) -> Option<String> {
    if record.get("type").and_then(Value::as_str) != Some("user") {
        return None;
    }
    let content = user_content(record)?;
    if CONTROL_MARKERS.iter().any(|marker| content.contains(marker)) {
        return None;
    }

    let re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());
    let stripped = re.replace_all(content, "");
    let text = stripped.trim();
    if text.chars().count() > MIN_MESSAGE_CHARS {
        Some(text.chars().take(MAX_MESSAGE_CHARS).collect())
    } else {
        None
    }
}

/// `message.content` as a string, or the first text block of a block list
fn user_content(record: &Value) -> Option<&str> {
    let content = record.pointer("/message/content")?;
    if let Some(s) = content.as_str() {
        return Some(s);
    }
    content.as_array()?.iter().find_map(|block| {
        if block.get("type").and_then(Value::as_str) == Some("text") {
            block.get("text").and_then(Value::as_str)
        } else {
            None
        }
    })
}
