use gaap_core::{read_config_file, Mode};
use gaap_session::SessionTitleCache;
use gaap_telemetry::{Paths, SystemClock};
use std::sync::Arc;

pub fn run() -> anyhow::Result<()> {
    let output = collect(&Paths::from_env());
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Read-only snapshot; never writes the error log or the cache
fn collect(paths: &Paths) -> serde_json::Value {
    let config_file = paths.existing_config_file();

    let mut output = serde_json::json!({
        "project_dir": paths.project_dir.display().to_string(),
        "config_file": config_file.as_ref().map(|p| p.display().to_string()),
        "cache_file": paths.cache_file().display().to_string(),
        "error_log": paths.error_log().display().to_string(),
    });

    output["config"] = match config_file.as_deref().map(read_config_file) {
        None => serde_json::json!("missing"),
        Some(Err(e)) => serde_json::json!({ "error": e.kind(), "detail": e.to_string() }),
        Some(Ok(config)) => serde_json::json!({
            "mode": mode_name(config.mode),
            "provider": config.provider.name(),
            "endpoint": config.endpoint,
            "model": config.model,
            "language": config.language.code(),
            "api_key": config.api_key.as_ref().map(|key| key.describe()),
            "api_key_resolved": config.api_key().is_some(),
        }),
    };

    let cache = SessionTitleCache::new(paths.cache_file(), Arc::new(SystemClock));
    output["cached_titles"] = match cache.load() {
        Ok(entries) => serde_json::json!(entries.len()),
        Err(e) => serde_json::json!({ "error": e.kind() }),
    };

    output
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Disabled => "disabled",
        Mode::Selective => "selective",
        Mode::Always => "always",
    }
}
