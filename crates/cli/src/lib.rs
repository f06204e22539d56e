pub mod commands;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Install the process-wide logger.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    builder.format_timestamp(None);
    // A logger may already be installed when commands run inside tests.
    let _ = builder.try_init();
}

/// Read an assembly listing from disk.
pub fn read_assembly(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read assembly file {}", path.display()))
}

/// Compute the SHA-256 hash of in-memory bytes and return it as a hex string.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Format a confidence in `[0, 1]` as a percentage with two decimals.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}
