//! Logging setup for klay.
//!
//! [`KlayTracer`] installs one stdout layer in the chosen [`LogFormat`]. Test code calls
//! [`init_test_tracing`], which writes through the test harness instead.
//!
//! Events of the transaction library are emitted under the `klay::tx` and `klay::combine`
//! targets, so `RUST_LOG=klay::combine=trace` shows signature merging in detail.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub use tracing;
pub use tracing_subscriber;

pub use formatter::LogFormat;
pub use test_tracer::TestTracer;

mod filter;
mod formatter;
mod test_tracer;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a global tracing subscriber.
pub trait Tracer {
    fn init(self) -> eyre::Result<()>;
}

/// Stdout logger, colored terminal output at `info` unless configured otherwise.
#[derive(Debug, Clone)]
pub struct KlayTracer {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: bool,
}

impl Default for KlayTracer {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: LevelFilter::INFO.to_string(),
            filters: String::new(),
            color: true,
        }
    }
}

impl KlayTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Directive used while `RUST_LOG` is unset, e.g. `debug`.
    pub fn with_default_directive(mut self, directive: impl Into<String>) -> Self {
        self.default_directive = directive.into();
        self
    }

    /// Comma separated directives applied on top of the default, e.g. `klay::tx=debug`.
    pub fn with_filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = filters.into();
        self
    }

    /// Turns ANSI colors off. `RUST_LOG_STYLE=never` does the same at runtime.
    pub const fn without_color(mut self) -> Self {
        self.color = false;
        self
    }
}

impl Tracer for KlayTracer {
    fn init(self) -> eyre::Result<()> {
        let filter = filter::build_env_filter(self.default_directive.parse()?, &self.filters)?;
        let layer = self.format.layer(filter, self.color);
        if let Err(err) = tracing_subscriber::registry().with(layer).try_init() {
            tracing::warn!(%err, "Tracing subscriber already installed");
        }
        Ok(())
    }
}

/// Installs a [`TestTracer`] filtered by `RUST_LOG`, ignoring a subscriber already in place.
pub fn init_test_tracing() {
    let _ = TestTracer::default().init();
}
