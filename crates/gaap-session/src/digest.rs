//! Content hashes and the deterministic fallback title

use std::path::Path;

const CONTENT_HASH_LEN: usize = 8;
const FOLDER_HASH_LEN: usize = 6;

fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// 8 hex chars identifying a first message; empty when there is none
pub fn content_hash(first_message: Option<&str>) -> String {
    match first_message {
        Some(message) if !message.is_empty() => md5_hex(message)[..CONTENT_HASH_LEN].to_string(),
        _ => String::new(),
    }
}

/// `{folder}_{6 hex chars}` derived only from the working directory
pub fn fallback_title(cwd: &str) -> String {
    let folder = Path::new(cwd)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "session".to_string());
    let seed = if cwd.is_empty() { "unknown" } else { cwd };

    format!("{}_{}", folder, &md5_hex(seed)[..FOLDER_HASH_LEN])
}
