pub fn run() -> anyhow::Result<()> {
    println!("gaap {}", env!("CARGO_PKG_VERSION"));
    println!("Session titles and message compression for assistant notifications");
    Ok(())
}
