//! Run configuration shared by the CLI and embedding code.

use std::path::PathBuf;

/// Default trace log location, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "qkd_log.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Trace log that every run is appended to.
    pub log_path: PathBuf,
    /// `tracing` filter directive, e.g. `info` or `qkd_sim=debug`.
    pub log_filter: String,
    /// Seed for a reproducible ChaCha20 source instead of the system CSPRNG.
    pub seed: Option<u64>,
    /// Whether traces are appended to `log_path`.
    pub persist: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            log_filter: "info".to_owned(),
            seed: None,
            persist: true,
        }
    }
}
