use gaap_compress::MessageCompressor;
use std::io::Read;

use super::{runtime, Context};

pub fn run() -> anyhow::Result<()> {
    // Invalid UTF-8 is replaced rather than rejected; the message is only displayed
    let mut raw = Vec::new();
    std::io::stdin().read_to_end(&mut raw)?;
    let input = String::from_utf8_lossy(&raw);
    let message = input.trim();
    if message.is_empty() {
        return Ok(());
    }

    let ctx = Context::from_env();
    let compressor =
        MessageCompressor::new(ctx.resolver(), ctx.summarizer.clone(), ctx.log.clone());

    let output = runtime()?.block_on(compressor.compress_or_original(message));
    println!("{}", output);
    Ok(())
}
