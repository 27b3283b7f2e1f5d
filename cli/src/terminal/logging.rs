use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::progress::ProgressWriter;

pub struct Ipmd5Formatter;

impl<S, N> FormatEvent<S, N> for Ipmd5Formatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn default_directive(verbose: u8, quiet: u8) -> &'static str {
    match (verbose, quiet) {
        (_, 2..) => "error",
        (_, 1) => "warn",
        (0, _) => "info",
        (1, _) => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `-v`/`-q`.
pub fn init_logging(verbose: u8, quiet: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(Ipmd5Formatter)
        .with_writer(|| ProgressWriter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_directive(0, 0), "info");
        assert_eq!(default_directive(1, 0), "debug");
        assert_eq!(default_directive(3, 0), "trace");
        assert_eq!(default_directive(0, 1), "warn");
        assert_eq!(default_directive(0, 5), "error");
    }
}
