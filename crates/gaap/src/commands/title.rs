use gaap_session::{SessionTitleCache, TitleGenerator};
use gaap_telemetry::SystemClock;
use std::path::Path;
use std::sync::Arc;

use super::{runtime, Context};

/// Printed when the hook is invoked without a transcript or cwd
const UNKNOWN_TITLE: &str = "?";

pub fn run(transcript: Option<&str>, cwd: Option<&str>) -> anyhow::Result<()> {
    let (Some(transcript), Some(cwd)) = (transcript, cwd) else {
        println!("{}", UNKNOWN_TITLE);
        return Ok(());
    };

    let ctx = Context::from_env();
    let cache = SessionTitleCache::new(ctx.paths.cache_file(), Arc::new(SystemClock));
    let generator = TitleGenerator::new(
        ctx.resolver(),
        ctx.summarizer.clone(),
        cache,
        ctx.log.clone(),
    );

    let title = runtime()?.block_on(generator.generate(Path::new(transcript), cwd));
    println!("{}", title);
    Ok(())
}
