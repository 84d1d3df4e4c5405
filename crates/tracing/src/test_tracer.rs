use tracing_subscriber::EnvFilter;

use crate::Tracer;

/// Tracer for tests: writes through the test harness so output is captured per test.
///
/// `RUST_LOG` takes precedence over the fallback directive, which is `off` unless set with
/// [`TestTracer::with_directive`].
#[derive(Debug, Clone, Default)]
pub struct TestTracer {
    directive: Option<String>,
}

impl TestTracer {
    /// Filter applied when `RUST_LOG` is unset, e.g. `klay::tx=trace`.
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    fn filter(&self) -> eyre::Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter)
        }
        Ok(EnvFilter::try_new(self.directive.as_deref().unwrap_or("off"))?)
    }
}

impl Tracer for TestTracer {
    fn init(self) -> eyre::Result<()> {
        let filter = self.filter()?;
        // another test may already have installed a subscriber
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
        Ok(())
    }
}
