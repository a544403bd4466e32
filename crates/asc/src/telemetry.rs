use std::io::IsTerminal;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Filter directives, e.g. `debug` or `asc_client=trace`.
pub const ENV_LOG_LEVEL: &str = "ASC_LOG_LEVEL";
/// Appends logs to this file instead of stderr.
pub const ENV_LOG_FILE: &str = "ASC_LOG_FILE";

#[derive(Debug)]
pub struct TelemetryGuard {
    _guard: Option<WorkerGuard>,
}

impl TelemetryGuard {
    fn disabled() -> Self {
        Self { _guard: None }
    }
}

/// `--verbose` raises the level to at least debug, even over `ASC_LOG_LEVEL`.
fn build_filter(directives: Option<&str>, verbose: bool) -> EnvFilter {
    let directives = directives
        .map(str::trim)
        .filter(|d| !d.is_empty() && EnvFilter::try_new(d).is_ok())
        .unwrap_or("warn");
    let filter = EnvFilter::new(directives);
    if !verbose {
        return filter;
    }
    // A later directive for the same target replaces an earlier one, so the
    // debug baseline goes first when the env level is already louder.
    if filter.max_level_hint() >= Some(LevelFilter::DEBUG) {
        EnvFilter::new(format!("debug,{directives}"))
    } else {
        EnvFilter::new(format!("{directives},debug"))
    }
}

/// Installs the global subscriber. Keep the guard alive until exit so the
/// file writer flushes.
pub fn init_tracing(verbose: bool) -> TelemetryGuard {
    let directives = std::env::var(ENV_LOG_LEVEL).ok();
    let env_filter = build_filter(directives.as_deref(), verbose);

    let (writer, guard, ansi) = match log_file_path_from_env() {
        Some(path) => match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                (BoxMakeWriter::new(non_blocking), Some(guard), false)
            }
            Err(err) => {
                eprintln!(
                    "Warning: failed to open log file {}: {}",
                    path.display(),
                    err
                );
                (
                    BoxMakeWriter::new(std::io::stderr),
                    None,
                    std::io::stderr().is_terminal(),
                )
            }
        },
        None => (
            BoxMakeWriter::new(std::io::stderr),
            None,
            std::io::stderr().is_terminal(),
        ),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    if subscriber.try_init().is_err() {
        return TelemetryGuard::disabled();
    }

    TelemetryGuard { _guard: guard }
}

fn log_file_path_from_env() -> Option<PathBuf> {
    std::env::var(ENV_LOG_FILE)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(build_filter(None, false).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(build_filter(None, true).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_verbose_wins_over_quieter_env_level() {
        assert_eq!(
            build_filter(Some("error"), false).max_level_hint(),
            Some(LevelFilter::ERROR)
        );
        assert_eq!(
            build_filter(Some("error"), true).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            build_filter(Some("trace"), true).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(
            build_filter(Some("asc_client=trace"), true).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(
            build_filter(Some("asc=loud"), false).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }
}
