use crate::utils;
use anyhow::{Context, Result};
use std::{fs::File, sync::Mutex};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "quad.log";
pub const LOG_ENV: &str = "QUAD_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Routes `tracing` output to a log file in the state directory.
///
/// The terminal belongs to the UI, so nothing is ever written to stdout or stderr.
pub fn init() -> Result<()> {
    let path = utils::get_state_dir()?.join(LOG_FILE);
    let file = File::create(&path)
        .with_context(|| format!("Error: couldn't create {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    Ok(())
}
