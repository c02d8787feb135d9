//! Tracing subscriber for the terminal.
//!
//! Two fmt layers share one filter: stderr for the operator, and a
//! non-blocking file writer under the configured log directory. `RUST_LOG`
//! replaces the default directives when set.

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};
use vh_core::config::LogConfig;

pub const LOG_FILE_NAME: &str = "vanning-handy.log";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default directives: the configured level for everything, debug for
/// the terminal crates in development builds, and quiet HTTP internals.
fn build_filter_directives(is_dev: bool, level: &str) -> Vec<String> {
    let level = if level.trim().is_empty() { "info" } else { level.trim() };
    let crate_level = if is_dev { "debug" } else { level };

    vec![
        level.to_string(),
        format!("vh_app={crate_level}"),
        format!("vh_infra={crate_level}"),
        format!("vh_terminal={crate_level}"),
        "hyper=warn".to_string(),
        "reqwest=warn".to_string(),
        "diesel=warn".to_string(),
    ]
}

/// Registers the global subscriber. Call once, before any use case runs.
///
/// A log directory that cannot be created falls back to stderr only.
pub fn init_tracing_subscriber(log: &LogConfig) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development(), &log.level);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    let stderr_writer = BoxMakeWriter::new(io::stderr);
    let file_writer = match build_file_writer(&log.dir) {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stderr: {err}");
            None
        }
    };

    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
        .with_level(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stderr_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
