//! Process-level configuration for the `sourcegate` binary.

use crate::storage::StoreConfig;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Multi-line, human-readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"sourcegate_router=debug,warn"`.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Top-level configuration assembled from CLI flags and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub log: LogConfig,
    /// Limits for the flag store built by `sourcegate flags`.
    pub flags: StoreConfig,
}
