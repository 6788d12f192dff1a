use anyhow::{Context, Result};
use mrp::Environment;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    init_logging();

    let raw = Environment::read_stdin().context("failed to read stdin")?;
    let env = outbreak::parameters::load(&raw)?;
    outbreak::run(&env)?;
    Ok(())
}

/// Logs go to stderr; stdout carries only model output.
fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("outbreak=warn"));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
