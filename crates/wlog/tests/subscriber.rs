use std::io::{self, Write};
use std::sync::Arc;

use chrono::DateTime;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serial_test::serial;
use tracing_subscriber::fmt::MakeWriter;
use werrors::Render;
use wlog::LogOptions;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture_with(options: &LogOptions, emit: impl FnOnce()) -> String {
    let capture = Capture::default();
    let subscriber = wlog::subscriber(options, capture.clone()).unwrap();
    tracing::subscriber::with_default(subscriber, emit);
    capture.text()
}

#[test]
fn error_line_layout() {
    let err = werrors::with_code(404, "not found: user").wrap("lookup failed");
    let options = LogOptions::new().with_disable_colors(true);
    let out = capture_with(&options, || {
        tracing::error!("{}", err.display(Render::Short));
    });

    let (time, rest) = out.split_once(' ').unwrap();
    assert!(DateTime::parse_from_rfc3339(time).is_ok(), "{out}");
    assert!(rest.starts_with("ERROR [subscriber.rs:"), "{out}");
    assert!(rest.ends_with("] lookup failed\n"), "{out}");
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn verbose_error_spans_lines() {
    let err = werrors::with_code(404, "not found: user").wrap("lookup failed");
    let options = LogOptions::new()
        .with_disable_colors(true)
        .with_ignore_basic_fields(true);
    let out = capture_with(&options, || {
        tracing::error!("{}", err.display(Render::Verbose));
    });

    assert_eq!(out, format!("{}\n", err.render(Render::Verbose)));
}

#[test]
fn fields_follow_message() {
    let options = LogOptions::new().with_ignore_basic_fields(true);
    let out = capture_with(&options, || {
        tracing::warn!(code = 7, status = "retry", "classified");
    });
    assert_eq!(out, "classified code=7 status=retry\n");
}

#[test]
fn filter_drops_lower_levels() {
    let options = LogOptions::new()
        .with_filter("warn")
        .with_ignore_basic_fields(true);
    let out = capture_with(&options, || {
        tracing::info!("hidden");
        tracing::warn!("shown");
    });
    assert_eq!(out, "shown\n");
}

#[test]
fn colors_wrap_level_name() {
    let out = capture_with(&LogOptions::new(), || {
        tracing::info!("colored");
    });
    assert!(out.contains("\x1b[32mINFO\x1b[0m"), "{out:?}");
}

#[test]
fn invalid_filter_is_classified() {
    let options = LogOptions::new().with_filter("werrdemo=loud");
    let err = wlog::subscriber(&options, Capture::default())
        .err()
        .unwrap();
    assert_eq!(err.code(), Some(wlog::CODE_INVALID_FILTER));
    assert!(err.to_string().contains("werrdemo=loud"));
}

#[test]
#[serial]
fn env_disables_colors() {
    // SAFETY: serialized with every other test touching the environment.
    unsafe { std::env::set_var("NO_COLOR", "1") };
    let options = LogOptions::new().with_env();
    unsafe { std::env::remove_var("NO_COLOR") };

    assert!(options.disable_colors);
    let out = capture_with(&options, || {
        tracing::info!("plain");
    });
    assert!(!out.contains('\x1b'), "{out:?}");
}
