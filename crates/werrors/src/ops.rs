//! Free-function constructors and combinators.
//!
//! Every combinator that takes an existing error accepts an
//! `Option<Error>` and returns `None` when given `None`, so a possibly
//! absent error can be passed up through layers without checks at each
//! one. Constructors always produce an error.

use std::error::Error as StdError;

use crate::{Code, Error, Result};

/// Create a root error from a message.
pub fn new(message: impl Into<String>) -> Error {
    Error::new(message)
}

/// Create a fresh classified error with no cause.
pub fn with_code(code: Code, message: impl Into<String>) -> Error {
    Error::with_code(code, message)
}

/// Record the current call stack around `err`, keeping its code.
pub fn with_stack(err: Option<Error>) -> Option<Error> {
    err.map(Error::with_stack)
}

/// Add a message and record the current call stack, keeping any code.
pub fn wrap(err: Option<Error>, message: impl Into<String>) -> Option<Error> {
    err.map(|err| err.wrap(message))
}

/// Add a message without capturing a stack.
pub fn with_message(err: Option<Error>, message: impl Into<String>) -> Option<Error> {
    err.map(|err| err.with_message(message))
}

/// Classify `err` with `code`, replacing any code it carried.
pub fn wrapc(err: Option<Error>, code: Code, message: impl Into<String>) -> Option<Error> {
    err.map(|err| err.wrapc(code, message))
}

/// Get the first code carried by a chain behind an erased error.
///
/// Walks `source()` from `err` and returns the code of the first
/// [`Error`] link that has one.
pub fn code_of(err: &(dyn StdError + 'static)) -> Option<Code> {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(code) = err.downcast_ref::<Error>().and_then(Error::code) {
            return Some(code);
        }
        current = err.source();
    }
    None
}

/// Create a root error from a format string.
///
/// ```
/// let err = werrors::errorf!("user {} not found", 42);
/// assert_eq!(err.to_string(), "user 42 not found");
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::new(::std::format!($($arg)*))
    };
}

/// Like [`wrap`](crate::wrap), with a formatted message.
#[macro_export]
macro_rules! wrapf {
    ($err:expr, $($arg:tt)*) => {
        $crate::wrap($err, ::std::format!($($arg)*))
    };
}

/// Like [`with_message`](crate::with_message), with a formatted message.
#[macro_export]
macro_rules! with_messagef {
    ($err:expr, $($arg:tt)*) => {
        $crate::with_message($err, ::std::format!($($arg)*))
    };
}

/// Like [`with_code`](fn@crate::with_code), with a formatted message.
///
/// ```
/// let err = werrors::with_code!(404, "not found: {}", "user");
/// assert_eq!(err.code(), Some(404));
/// assert_eq!(err.to_string(), "not found: user");
/// ```
#[macro_export]
macro_rules! with_code {
    ($code:expr, $($arg:tt)*) => {
        $crate::with_code($code, ::std::format!($($arg)*))
    };
}

/// Like [`wrapc`](fn@crate::wrapc), with a formatted message.
#[macro_export]
macro_rules! wrapc {
    ($err:expr, $code:expr, $($arg:tt)*) => {
        $crate::wrapc($err, $code, ::std::format!($($arg)*))
    };
}

/// Chain combinators for `Result`.
///
/// `Ok` values pass through untouched. An `Err` holding a foreign error is
/// first adopted with [`Error::from_std`].
pub trait ResultExt<T> {
    /// See [`Error::with_stack`].
    fn with_stack(self) -> Result<T>;

    /// See [`Error::wrap`].
    fn wrap(self, message: impl Into<String>) -> Result<T>;

    /// Like [`ResultExt::wrap`], building the message only on error.
    fn wrap_with<M, F>(self, message: F) -> Result<T>
    where
        M: Into<String>,
        F: FnOnce() -> M;

    /// See [`Error::with_message`].
    fn with_message(self, message: impl Into<String>) -> Result<T>;

    /// See [`Error::wrapc`].
    fn wrapc(self, code: Code, message: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn with_stack(self) -> Result<T> {
        self.map_err(|e| Error::from_std(e).with_stack())
    }

    fn wrap(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::from_std(e).wrap(message))
    }

    fn wrap_with<M, F>(self, message: F) -> Result<T>
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        self.map_err(|e| Error::from_std(e).wrap(message()))
    }

    fn with_message(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::from_std(e).with_message(message))
    }

    fn wrapc(self, code: Code, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::from_std(e).wrapc(code, message))
    }
}
