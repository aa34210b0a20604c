//! Text formatting of log lines.

use std::fmt::{self, Write as _};

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const RESET: &str = "\x1b[0m";

/// One log record, ready to be formatted.
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    pub time: DateTime<FixedOffset>,
    pub level: Level,
    pub file: Option<&'a str>,
    pub line: Option<u32>,
    pub message: &'a str,
}

/// Formats entries as `<RFC3339 time> <LEVEL> [<file>:<line>] <message>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextFormatter {
    /// Write only the message, without time, level and call site.
    pub ignore_basic_fields: bool,
    /// Never wrap the level name in ANSI colors.
    pub disable_colors: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_basic_fields(mut self, ignore: bool) -> Self {
        self.ignore_basic_fields = ignore;
        self
    }

    pub fn with_disable_colors(mut self, disable: bool) -> Self {
        self.disable_colors = disable;
        self
    }

    /// Format `entry` into a new string, including the trailing newline.
    pub fn format(&self, entry: &Entry<'_>) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_entry(&mut out, entry, !self.disable_colors);
        out
    }

    fn write_entry(&self, out: &mut dyn fmt::Write, entry: &Entry<'_>, ansi: bool) -> fmt::Result {
        if !self.ignore_basic_fields {
            let time = entry.time.to_rfc3339_opts(SecondsFormat::Secs, true);
            if ansi {
                write!(out, "{time} {}{}{RESET} ", level_color(&entry.level), entry.level)?;
            } else {
                write!(out, "{time} {} ", entry.level)?;
            }
            if let Some(file) = entry.file {
                match entry.line {
                    Some(line) => write!(out, "[{}:{line}] ", short_file(file))?,
                    None => write!(out, "[{}] ", short_file(file))?,
                }
            }
        }
        out.write_str(entry.message)?;
        out.write_char('\n')
    }
}

impl<S, N> FormatEvent<S, N> for TextFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let message = visitor.finish();

        let entry = Entry {
            time: Local::now().fixed_offset(),
            level: *meta.level(),
            file: meta.file(),
            line: meta.line(),
            message: &message,
        };
        let ansi = writer.has_ansi_escapes() && !self.disable_colors;
        self.write_entry(&mut writer, &entry, ansi)
    }
}

/// Collects the `message` field, with other fields appended as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn record(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value}");
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }

    fn finish(mut self) -> String {
        if self.message.is_empty() {
            return self.fields.trim_start().to_string();
        }
        self.message.push_str(&self.fields);
        self.message
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, format_args!("{value}"));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format_args!("{value:?}"));
    }
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[31m",
        Level::WARN => "\x1b[33m",
        Level::INFO => "\x1b[32m",
        Level::DEBUG => "\x1b[34m",
        _ => "\x1b[35m",
    }
}

/// Last path component of `file`, for either separator.
fn short_file(file: &str) -> &str {
    file.rsplit(['/', '\\']).next().unwrap_or(file)
}
