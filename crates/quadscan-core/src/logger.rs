//! Stderr logger for the `quadscan` binaries.
//!
//! Lines look like `quadscan +0.042s DEBUG marker::candidates: message`.
//! Records from the `quadscan_*` crates pass at the configured level; other
//! crates are capped at `Warn` so decoder chatter stays out of the way.
//! Library code only talks to the `log` facade.

use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::EnvFilter;

/// Target prefix shared by every crate in the workspace.
const OWN_TARGET: &str = "quadscan";

/// Environment variable read by [`init_tracing`].
pub const LOG_ENV: &str = "QUADSCAN_LOG";

struct StderrLogger {
    started: Instant,
}

/// Level a record from `target` must reach to be printed.
fn target_ceiling(target: &str, level: LevelFilter) -> LevelFilter {
    if target.starts_with(OWN_TARGET) {
        level
    } else {
        level.min(LevelFilter::Warn)
    }
}

/// `quadscan_marker::candidates` -> `marker::candidates`.
fn short_target(target: &str) -> &str {
    target
        .strip_prefix("quadscan_")
        .or_else(|| target.strip_prefix(OWN_TARGET))
        .map(|t| t.trim_start_matches("::"))
        .filter(|t| !t.is_empty())
        .unwrap_or(target)
}

fn format_line(elapsed: f64, level: Level, target: &str, args: fmt::Arguments<'_>) -> String {
    format!(
        "{OWN_TARGET} +{elapsed:.3}s {level:<5} {}: {args}",
        short_target(target)
    )
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= target_ceiling(metadata.target(), log::max_level())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            *record.args(),
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger and set the level for the `quadscan` crates.
///
/// A second call only changes the level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            started: Instant::now(),
        });
        log::set_logger(logger)?;
    }
    log::set_max_level(level);
    Ok(())
}

/// [`init_with_level`] from a level name such as `--log-level` takes.
pub fn init_from_name(name: &str) -> Result<(), log::SetLoggerError> {
    init_with_level(parse_level(name))
}

/// Parse a level name (`off`, `error`, ..., `trace`), falling back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Info)
}

/// Install a `tracing` subscriber on stderr with span close events.
///
/// The filter comes from [`LOG_ENV`], defaulting to `info` for the
/// `quadscan` crates and `warn` elsewhere.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{OWN_TARGET}=info")));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(tracing_subscriber::fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
