//! Logging system initialization

use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor `BEANLINK_LOG_LEVEL` is set.
///
/// Diagnostics go through `tracing`; command output itself is plain
/// stdout, so the default keeps the log channel quiet.
pub const DEFAULT_LOG_LEVEL: &str = "beanlink=warn";

/// Initialize the tracing subscriber.
///
/// Call once during startup. The returned guard must be kept alive for
/// the duration of the program so non-blocking log writes are flushed.
pub fn init_logging(level: &str) -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(true)
        .init();

    guard
}
