use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// Bunyan-style JSON, one object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("unknown log format '{}'", other))),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` level.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let pretty = (format == LogFormat::Pretty).then(|| tracing_subscriber::fmt::layer());
    let storage = (format == LogFormat::Json).then_some(JsonStorageLayer);
    let bunyan = (format == LogFormat::Json)
        .then(|| BunyanFormattingLayer::new(env!("CARGO_PKG_NAME").to_string(), std::io::stdout));

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(storage)
        .with(bunyan)
        .try_init()
        .is_ok()
}
