//! Logging setup for the `shape-context` binary and examples.
//!
//! The core only emits through the `log` macros. `init_with_level` installs
//! a stderr sink whose lines read `[  0.012s DEBUG shape_context_core::geometry] ...`;
//! the `tracing` feature adds `init_tracing` for span timings.

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

/// One stderr line: elapsed seconds, level, module path, message.
fn format_line(elapsed_s: f64, level: Level, target: &str, args: &fmt::Arguments<'_>) -> String {
    format!("[{elapsed_s:8.3}s {level:>5} {target}] {args}")
}

struct DescriptorLog {
    max_level: LevelFilter,
    origin: Instant,
}

impl Log for DescriptorLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = format_line(
                self.origin.elapsed().as_secs_f64(),
                record.level(),
                record.target(),
                record.args(),
            );
            let _ = writeln!(std::io::stderr().lock(), "{line}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static SINK: OnceLock<DescriptorLog> = OnceLock::new();

/// Install the stderr sink. Only the first call takes effect.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if SINK.get().is_some() {
        return Ok(());
    }
    let sink = SINK.get_or_init(|| DescriptorLog {
        max_level: level,
        origin: Instant::now(),
    });
    log::set_logger(sink)?;
    log::set_max_level(level);
    Ok(())
}

/// Level from a `--log-level` value (`"off"` ... `"trace"`, any case).
/// Unknown names fall back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Info)
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`),
/// reporting span close times. `json` switches to flattened JSON events.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
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
