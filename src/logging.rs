//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a stderr fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Logs go to stderr so stdout stays free for command output and RPC replies.
/// Calling this twice is harmless; the second call is ignored.
pub fn init() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
