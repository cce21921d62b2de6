//! Tracing setup for the REPL.
//!
//! Two sinks: a rotating `spellwatch.log` in the config dir that keeps
//! everything at info and above, and stderr that only shows warnings so
//! nothing interleaves with the prompt. `DEBUG_LOGGING` switches both to
//! debug for the spellwatch crates.

use std::path::{Path, PathBuf};

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE_NAME: &str = "spellwatch.log";
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;
const DEBUG_DIRECTIVE: &str = "info,spellwatch_core=debug,spellwatch_cli=debug";

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit or buffered file lines are lost.
/// `None` means the log file could not be opened and only stderr is active.
pub fn init() -> Option<WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let appender = match open_log_file() {
        Ok((appender, path)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_span_events(FmtSpan::NONE)
                .with_filter(level_filter(debug_logging, "info"));

            tracing_subscriber::registry()
                .with(file_layer)
                .with(console_layer(debug_logging))
                .init();

            Some((guard, path))
        }
        Err(reason) => {
            // Subscriber isn't up yet
            eprintln!("{reason}, logging to stderr only");
            tracing_subscriber::registry()
                .with(console_layer(debug_logging))
                .init();
            None
        }
    };

    let (guard, path) = appender?;
    tracing::info!(log_file = %path.display(), debug_logging, "Logging initialized");
    Some(guard)
}

fn open_log_file() -> Result<(BasicRollingFileAppender, PathBuf), String> {
    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("spellwatch"))
        .ok_or_else(|| "No config directory on this platform".to_string())?;
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| format!("Cannot create {}: {e}", log_dir.display()))?;

    let path = log_dir.join(LOG_FILE_NAME);
    let appender = rotating_appender(&path)
        .map_err(|e| format!("Cannot open {}: {e}", path.display()))?;
    Ok((appender, path))
}

/// Rolls over at 10 MB, one backup kept
fn rotating_appender(path: &Path) -> std::io::Result<BasicRollingFileAppender> {
    BasicRollingFileAppender::new(path, RollingConditionBasic::new().max_size(MAX_LOG_BYTES), 1)
}

fn level_filter(debug_logging: bool, default: &str) -> EnvFilter {
    EnvFilter::new(if debug_logging { DEBUG_DIRECTIVE } else { default })
}

fn console_layer<S>(debug_logging: bool) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(level_filter(debug_logging, "warn"))
}
