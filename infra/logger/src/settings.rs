use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::rolling::Rotation;

/// Deserializable logging section, as found under `[logging]` in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Identifies the process in log lines and prefixes rolling log files.
    pub name: String,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    pub console: bool,
    /// Directory for rolling log files; file output is off when absent.
    pub path: Option<PathBuf>,
    /// Writes file output as JSON lines.
    pub json: bool,
    /// `EnvFilter` directives such as `mcf_format=debug`. `RUST_LOG` applies when absent.
    pub filter: Option<String>,
    pub rotation: RotationPolicy,
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "mcf".to_owned(),
            level: "info".to_owned(),
            console: true,
            path: None,
            json: false,
            filter: None,
            rotation: RotationPolicy::default(),
            max_files: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<RotationPolicy> for Rotation {
    fn from(policy: RotationPolicy) -> Self {
        match policy {
            RotationPolicy::Minutely => Self::MINUTELY,
            RotationPolicy::Hourly => Self::HOURLY,
            RotationPolicy::Daily => Self::DAILY,
            RotationPolicy::Never => Self::NEVER,
        }
    }
}
