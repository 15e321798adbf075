//! Shared plumbing for the operator binaries.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use champ_core::EngineConfig;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();
}

/// Load an engine config from TOML, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    config.validate().context("Invalid engine config")?;
    Ok(config)
}

pub fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}
