use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LOG_FILE_NAME, Settings};

const DEFAULT_FILTER: &str = "text_clipper=debug";

/// Installs a file logger when debugging is on. Logs are dropped otherwise.
/// Keep the returned guard alive until the command finishes so buffered
/// lines get flushed.
pub fn init(settings: &Settings) -> Option<WorkerGuard> {
    if !settings.debug {
        return None;
    }
    let dir = settings.data_dir();
    if std::fs::create_dir_all(&dir).is_err() {
        return None;
    }
    let filter = settings.log_filter.as_deref().unwrap_or(DEFAULT_FILTER);
    init_file(&dir, filter)
}

fn init_file(dir: &Path, filter: &str) -> Option<WorkerGuard> {
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}
