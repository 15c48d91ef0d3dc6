use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup logging with rotating file appender.
///
/// Logs are written to the specified directory with daily rotation.
///
/// # Arguments
/// * `log_dir` - Directory for log files (e.g., "logs")
/// * `log_prefix` - Prefix for log files (e.g., "froala-assets")
/// * `debug_mode` - If true, use debug level; otherwise use info level
///
/// # Returns
/// A guard that must be held for the duration of the program to keep logging active
pub fn setup_logging(
    log_dir: &Utf8Path,
    log_prefix: &str,
    debug_mode: bool,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    setup_logging_with_console(log_dir, log_prefix, debug_mode, false)
}

/// Setup logging with optional console output.
///
/// Console output goes to stderr so that resolved import lists on stdout stay
/// machine-readable. `RUST_LOG` takes precedence over `debug_mode` when set.
///
/// # Arguments
/// * `log_dir` - Directory for log files
/// * `log_prefix` - Prefix for log files
/// * `debug_mode` - If true, use debug level; otherwise use info level
/// * `console_output` - If true, also log to stderr
///
/// # Returns
/// A guard that must be held for the duration of the program to keep logging active
pub fn setup_logging_with_console(
    log_dir: &Utf8Path,
    log_prefix: &str,
    debug_mode: bool,
    console_output: bool,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    ensure_log_dir(log_dir)?;

    // Create daily rotating file appender
    let file_appender = rolling::daily(log_dir, log_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug_mode { "debug" } else { "info" }));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI codes in log files
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let console_layer = console_output.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        "Logging initialized: dir={}, prefix={}, debug={}, console={}",
        log_dir,
        log_prefix,
        debug_mode,
        console_output
    );

    Ok(guard)
}

fn ensure_log_dir(log_dir: &Utf8Path) -> Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(())
}
