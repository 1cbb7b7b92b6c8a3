//! Logging setup for calcpad
//!
//! Log lines go to stderr so they never interleave with the display output on
//! stdout. Format: `time LEVEL module: message fields`.

use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    registry::LookupSpan,
    EnvFilter,
};

/// Level column, right-aligned to five characters
fn level_tag(level: Level, ansi: bool) -> String {
    let tag = format!("{:>5}", level.as_str());
    if !ansi {
        return tag;
    }
    match level {
        Level::ERROR => tag.red().bold().to_string(),
        Level::WARN => tag.yellow().to_string(),
        Level::INFO => tag.green().to_string(),
        Level::DEBUG => tag.blue().to_string(),
        Level::TRACE => tag.dimmed().to_string(),
    }
}

/// Last path segment of an event target: `calcpad_engine::engine` -> `engine`
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

/// `14:03:07.412 DEBUG engine: equals result=8 display=8`
struct KeypadFormat;

impl<S, N> FormatEvent<S, N> for KeypadFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let target = short_target(metadata.target());

        write!(
            writer,
            "{} {} ",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            level_tag(*metadata.level(), ansi)
        )?;
        if ansi {
            write!(writer, "{} ", format!("{}:", target).dimmed())?;
        } else {
            write!(writer, "{}: ", target)?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Pick the filter directive
///
/// Priority: `RUST_LOG` > `--verbose` (debug) > configured level.
pub fn resolve_filter(verbose: bool, configured: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if verbose { "debug" } else { configured };
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(filter: EnvFilter, ansi: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .event_format(KeypadFormat)
        .try_init();
}
