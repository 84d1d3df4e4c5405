use std::{fmt, fmt::Display, str::FromStr};
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// A boxed layer over the plain registry.
pub(crate) type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Output format of the stdout layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// `key=value` pairs.
    LogFmt,
    /// Human readable lines.
    Terminal,
}

impl LogFormat {
    /// Builds the stdout layer for this format behind `filter`.
    ///
    /// `RUST_LOG_STYLE=never` disables colors and `RUST_LOG_TARGET=0|1` forces the event target
    /// off or on. Without it the target is shown once `debug` or `trace` events pass the filter.
    pub(crate) fn layer(self, filter: EnvFilter, color: bool) -> BoxedLayer {
        let ansi = color && std::env::var("RUST_LOG_STYLE").map_or(true, |style| style != "never");
        let target = match std::env::var("RUST_LOG_TARGET") {
            Ok(val) => val != "0",
            Err(_) => filter.max_level_hint().map_or(true, |level| level > tracing::Level::INFO),
        };

        match self {
            Self::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(ansi)
                .with_target(target)
                .with_filter(filter)
                .boxed(),
            Self::LogFmt => tracing_logfmt::layer().with_filter(filter).boxed(),
            Self::Terminal => tracing_subscriber::fmt::layer()
                .with_ansi(ansi)
                .with_target(target)
                .with_filter(filter)
                .boxed(),
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::LogFmt => write!(f, "logfmt"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "logfmt" => Ok(Self::LogFmt),
            "terminal" => Ok(Self::Terminal),
            other => Err(eyre::eyre!("unknown log format: {other}")),
        }
    }
}
