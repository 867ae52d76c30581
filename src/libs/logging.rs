use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Logs to stderr. Used by the line and server modes.
pub fn init_stderr(default_level: &str) {
    tracing_subscriber::registry()
        .with(filter(default_level))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Logs to a file, since the interactive mode owns the terminal. Keep the
/// guard alive until exit or buffered lines are lost.
pub fn init_file(path: &Path, default_level: &str) -> WorkerGuard {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "typeahead.log".into());

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(filter(default_level))
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    guard
}
