//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFile;
use crate::infrastructure::paths;
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "datagrid.log";

/// Initializes the tracing subscriber with a rotating log file.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters spans and events by level
/// 2. Formats them as plain-text lines
/// 3. Writes them to a rotating file with backups
///
/// # Trace Level Resolution
///
/// 1. `RUST_LOG` environment variable
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # File Location
///
/// `<data dir>/datagrid.log`, see [`paths::data_dir`].
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently skips setup if directory creation fails (logging is optional)
/// - Idempotent: only the first call takes effect
///
/// # Example
///
/// ```rust
/// use datagrid::observability::init_tracing;
/// use datagrid::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     log_dir: Some(dir.path().display().to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());

    let data_dir = paths::data_dir(config);
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let writer = RotatingFile::new(data_dir.join(LOG_FILE_NAME));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}
