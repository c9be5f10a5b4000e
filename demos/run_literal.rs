//! Runs a fixed expression through the engine and prints the result
//!
//! Usage: cargo run --example run_literal
//! Set RUST_LOG=script_engine=trace to watch each stage.

use script_engine::Engine;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let engine = Engine::new();
    let value = engine.run("1 + 2 * 3")?;

    let result = value
        .int_projection()
        .ok_or_else(|| anyhow::anyhow!("result is not an integer: {}", value))?;
    println!("{}", result);

    Ok(())
}
