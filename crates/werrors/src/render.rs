//! Rendering modes for error chains

use std::fmt;

use crate::Error;
use crate::error::Node;

/// How an error should be turned into text.
///
/// The caller picks the mode at the output site: `Short` for user-facing
/// text, `Verbose` for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Render {
    /// The link's own message only. Never includes causes or stacks.
    #[default]
    Short,

    /// The short message in double quotes, with escapes.
    Quoted,

    /// The whole chain, root cause first, each link followed by the stack
    /// captured at that link.
    Verbose,
}

impl Render {
    /// Map a printf-style verb (`%s`, `%q`, `%v`, `%+v`, with or without
    /// the `%`) to a rendering mode.
    ///
    /// Unknown verbs fall back to [`Render::Short`].
    pub fn from_verb(verb: &str) -> Self {
        match verb.strip_prefix('%').unwrap_or(verb) {
            "q" => Render::Quoted,
            "+v" => Render::Verbose,
            _ => Render::Short,
        }
    }
}

/// A borrowed error paired with a rendering mode, ready for `{}`.
pub struct Rendered<'a> {
    error: &'a Error,
    mode: Render,
}

impl Error {
    /// Render this error into a new string.
    pub fn render(&self, mode: Render) -> String {
        self.display(mode).to_string()
    }

    /// Pair this error with a rendering mode for use in format strings.
    pub fn display(&self, mode: Render) -> Rendered<'_> {
        Rendered { error: self, mode }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Render::Short => f.write_str(self.error.message()),
            Render::Quoted => write!(f, "{:?}", self.error.message()),
            Render::Verbose => write_verbose(self.error, f),
        }
    }
}

fn write_verbose(error: &Error, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match error.node() {
        Node::Fundamental { message, stack, .. } => {
            f.write_str(message)?;
            write!(f, "{stack}")
        }
        Node::WithStack { inner, stack } => {
            write_verbose(inner, f)?;
            write!(f, "{stack}")
        }
        Node::WithMessage { cause, message } => {
            write_verbose(cause, f)?;
            write!(f, "\n{message}")
        }
        Node::WithCode {
            message,
            cause,
            stack,
            ..
        } => {
            if let Some(cause) = cause {
                write_verbose(cause, f)?;
                f.write_str("\n")?;
            }
            f.write_str(message)?;
            write!(f, "{stack}")
        }
    }
}
