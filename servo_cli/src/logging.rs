//! Tracing subscriber setup: console on stderr plus an optional file sink.

use eyre::WrapErr;
use std::path::Path;
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LEVEL: &str = "info";

/// Flushes the file sink when dropped. Held here so exit paths that skip
/// destructors (errors, Ctrl-C) can still drain it.
static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

fn keep_guard(guard: Option<WorkerGuard>) {
    let mut slot = LOG_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    *slot = guard;
}

/// Drain buffered file logs. Call before `process::exit`; safe to call
/// more than once and from the signal handler thread.
pub fn flush() {
    let guard = LOG_GUARD.lock().unwrap_or_else(|e| e.into_inner()).take();
    drop(guard);
}

/// Level used when `RUST_LOG` is unset: flag, then config, then `info`.
pub fn effective_level<'a>(flag: Option<&'a str>, config: Option<&'a str>) -> &'a str {
    flag.or(config).unwrap_or(DEFAULT_LEVEL)
}

fn rotation(name: Option<&str>) -> Rotation {
    match name {
        Some("daily") => Rotation::DAILY,
        Some("hourly") => Rotation::HOURLY,
        _ => Rotation::NEVER,
    }
}

fn file_appender(path: &Path, rotation_name: Option<&str>) -> eyre::Result<RollingFileAppender> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| eyre::eyre!("logging.file has no file name: {}", path.display()))?;
    RollingFileAppender::builder()
        .rotation(rotation(rotation_name))
        .filename_prefix(prefix)
        .build(dir)
        .wrap_err_with(|| format!("open log file {}", path.display()))
}

/// Install the global subscriber. Console logs always go to stderr so that
/// stdout only carries command output.
///
/// The file sink is buffered; call [`flush`] before the process exits.
pub fn init(json: bool, level: &str, logging: &servo_config::Logging) -> eyre::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| eyre::eyre!("invalid log level {level:?}: {e}"))?,
    };

    let console = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let mut guard = None;
    let file = match logging.file.as_deref() {
        Some(path) => {
            let appender = file_appender(Path::new(path), logging.rotation.as_deref())?;
            let (writer, g) = tracing_appender::non_blocking(appender);
            guard = Some(g);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .wrap_err("install tracing subscriber")?;
    keep_guard(guard);
    Ok(())
}
