//! Node kinds of an error chain

use strum_macros::{Display, EnumIter, IntoStaticStr};

/// The shape of a single link in an error chain.
///
/// Every [`crate::Error`] is exactly one of these. Combinators inspect the
/// kind of the error they receive to decide how to extend the chain, most
/// notably to carry a classification code forward when a
/// [`Kind::WithCode`] link is wrapped again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display, EnumIter)]
pub enum Kind {
    /// A root error created from a message. Owns a stack snapshot.
    Fundamental,

    /// A stack snapshot taken around an existing error. Has no message of
    /// its own; the short message is the inner error's.
    WithStack,

    /// A cheap annotation: a message on top of a cause. Never owns a stack.
    WithMessage,

    /// A classified error: message, numeric code, optional cause and a
    /// stack snapshot.
    WithCode,
}

impl Kind {
    /// Returns the kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Whether links of this kind capture a stack snapshot when created.
    pub fn owns_stack(&self) -> bool {
        !matches!(self, Kind::WithMessage)
    }
}
