use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes logging with a console layer and a daily-rotated JSON file under `log_dir`.
///
/// The returned guard flushes the file writer when dropped; hold it for the life of `main`.
/// When `log_dir` cannot be created only the console layer is installed.
pub fn init_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("equipment_scraper=info,warn"));

    let (file_layer, guard, dir_error) = match fs::create_dir_all(log_dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(log_dir, "scraper.log");
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().json().with_writer(non_blocking_writer);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    // Console goes to stderr so CSV written to stdout stays clean
    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();
    if let Err(e) = installed {
        eprintln!("Logging already initialized: {e}");
    }

    if let Some(e) = dir_error {
        tracing::warn!("File logging disabled, cannot create {}: {}", log_dir.display(), e);
    }
    guard
}
