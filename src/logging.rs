use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Send logs to a daily rolling file. The terminal belongs to the TUI, so
/// nothing is written to stdout or stderr.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(log_dir: &Path, level: &str) -> Result<WorkerGuard, String> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| format!("Cannot create log dir {}: {}", log_dir.display(), e))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "triviaterm.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("Cannot install logger: {}", e))?;

    Ok(guard)
}
