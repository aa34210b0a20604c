//! # wlog
//!
//! Single-line text logs for `tracing`:
//!
//! ```text
//! 2024-05-01T12:30:00+08:00 ERROR [auth.rs:17] unrecognized Authorization header
//! ```
//!
//! Errors from `werrors` are logged by choosing a rendering at the call site:
//!
//! ```rust
//! use werrors::Render;
//!
//! let err = werrors::with_code(101101, "unrecognized Authorization header");
//! tracing::error!("{}", err.display(Render::Verbose));
//! ```

mod formatter;
mod options;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use werrors::ResultExt;

pub use formatter::{Entry, TextFormatter};
pub use options::LogOptions;

/// Code of the error returned when the filter directive cannot be parsed.
pub const CODE_INVALID_FILTER: werrors::Code = 1001;

/// Code of the error returned when a global subscriber is already installed.
pub const CODE_INIT_FAILED: werrors::Code = 1002;

/// Build a subscriber writing formatted lines to `writer`, without
/// installing it.
pub fn subscriber<W>(
    options: &LogOptions,
    writer: W,
) -> werrors::Result<impl Subscriber + Send + Sync + use<W>>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(&options.filter).wrapc(
        CODE_INVALID_FILTER,
        format!("invalid log filter {:?}", options.filter),
    )?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!options.disable_colors)
        .with_writer(writer)
        .event_format(options.formatter())
        .finish())
}

/// Install the global subscriber, writing to stderr.
pub fn init(options: &LogOptions) -> werrors::Result<()> {
    let subscriber = subscriber(options, std::io::stderr)?;
    tracing::subscriber::set_global_default(subscriber)
        .wrapc(CODE_INIT_FAILED, "log subscriber already installed")?;
    tracing::debug!(filter = %options.filter, "logging initialized");
    Ok(())
}
