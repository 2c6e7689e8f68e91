//! Logging initialization using the `tracing` ecosystem.
//!
//! Console output goes to stderr so stdout stays free for quote tables and
//! JSON. File output, when a directory is configured, rotates daily and is
//! written from a background thread via `tracing-appender`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`. When `log_dir` is set, log
/// files are named `<module_name>.<date>` and the returned guard must be held
/// until exit so buffered lines are flushed. A second call leaves the first
/// subscriber in place.
pub fn init_logging(log_level: &str, log_dir: Option<&str>, module_name: &str) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, module_name));
            let layer = fmt::layer().with_writer(writer).with_ansi(false).with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    if tracing_subscriber::registry().with(env_filter).with(console_layer).with(file_layer).try_init().is_err() {
        tracing::debug!("global subscriber already installed");
    }
    guard
}
