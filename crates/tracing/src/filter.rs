use tracing_subscriber::{filter::Directive, EnvFilter};

/// Dependencies that are too chatty below `info` to be useful in transaction logs.
const QUIET_DEPENDENCIES: [&str; 1] = ["secp256k1=off"];

/// Builds the stdout filter.
///
/// `RUST_LOG` replaces `default_directive` when set. The comma separated `directives` are always
/// added on top.
pub(crate) fn build_env_filter(
    default_directive: Directive,
    directives: &str,
) -> eyre::Result<EnvFilter> {
    let base = EnvFilter::builder().with_default_directive(default_directive).from_env_lossy();
    QUIET_DEPENDENCIES
        .into_iter()
        .chain(directives.split(',').filter(|d| !d.is_empty()))
        .try_fold(base, |filter, directive| Ok(filter.add_directive(directive.parse()?)))
}
