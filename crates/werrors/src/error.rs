//! The error chain type.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::Kind;
use crate::render::Render;
use crate::stack::Stack;

/// Caller-defined classification code carried by [`Kind::WithCode`] links.
pub type Code = i32;

type Foreign = Box<dyn StdError + Send + Sync + 'static>;

/// A link in an error chain.
///
/// An `Error` is an immutable node holding a short message, an optional
/// classification code, an optional cause and (for every kind but
/// [`Kind::WithMessage`]) the call stack captured when it was created.
/// Cloning is cheap and shares the node, so one cause can be held by many
/// outer errors and formatted from many threads at once.
#[derive(Clone)]
pub struct Error {
    node: Arc<Node>,
}

pub(crate) enum Node {
    Fundamental {
        message: String,
        source: Option<Foreign>,
        stack: Stack,
    },
    WithStack {
        inner: Error,
        stack: Stack,
    },
    WithMessage {
        cause: Error,
        message: String,
    },
    WithCode {
        message: String,
        code: Code,
        cause: Option<Error>,
        stack: Stack,
    },
}

impl Error {
    fn from_node(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    pub(crate) fn node(&self) -> &Node {
        &self.node
    }

    /// Create a root error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_node(Node::Fundamental {
            message: message.into(),
            source: None,
            stack: Stack::capture(),
        })
    }

    /// Create a fresh classified error with no cause.
    pub fn with_code(code: Code, message: impl Into<String>) -> Self {
        Self::from_node(Node::WithCode {
            message: message.into(),
            code,
            cause: None,
            stack: Stack::capture(),
        })
    }

    /// Adopt a foreign error as the root of a chain.
    ///
    /// The foreign error's `Display` text becomes the message and the error
    /// itself stays reachable through [`Error::source_ref`]. An `Error`
    /// passed in here is returned unchanged.
    pub fn from_std<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: Foreign = Box::new(err);
        match boxed.downcast::<Error>() {
            Ok(err) => *err,
            Err(foreign) => Self::from_node(Node::Fundamental {
                message: foreign.to_string(),
                source: Some(foreign),
                stack: Stack::capture(),
            }),
        }
    }

    /// Record the current call stack around this error.
    ///
    /// A classified error stays classified: the result is a new
    /// [`Kind::WithCode`] link with the same code and message whose cause is
    /// `self`.
    pub fn with_stack(self) -> Self {
        let stack = Stack::capture();
        if let Node::WithCode { message, code, .. } = self.node() {
            let (message, code) = (message.clone(), *code);
            return Self::from_node(Node::WithCode {
                message,
                code,
                cause: Some(self),
                stack,
            });
        }
        Self::from_node(Node::WithStack { inner: self, stack })
    }

    /// Add a message and record the current call stack.
    ///
    /// If `self` carries a code the code is copied onto the new link.
    /// Otherwise the message is attached as a [`Kind::WithMessage`] link,
    /// which is then wrapped in a [`Kind::WithStack`] link.
    pub fn wrap(self, message: impl Into<String>) -> Self {
        let stack = Stack::capture();
        if let Some(code) = self.code() {
            return Self::from_node(Node::WithCode {
                message: message.into(),
                code,
                cause: Some(self),
                stack,
            });
        }
        let annotated = Self::from_node(Node::WithMessage {
            cause: self,
            message: message.into(),
        });
        Self::from_node(Node::WithStack {
            inner: annotated,
            stack,
        })
    }

    /// Add a message without capturing a stack or carrying a code forward.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self::from_node(Node::WithMessage {
            cause: self,
            message: message.into(),
        })
    }

    /// Classify this error with `code`, replacing any code it carried.
    pub fn wrapc(self, code: Code, message: impl Into<String>) -> Self {
        Self::from_node(Node::WithCode {
            message: message.into(),
            code,
            cause: Some(self),
            stack: Stack::capture(),
        })
    }

    /// Get the kind of this link.
    pub fn kind(&self) -> Kind {
        match self.node() {
            Node::Fundamental { .. } => Kind::Fundamental,
            Node::WithStack { .. } => Kind::WithStack,
            Node::WithMessage { .. } => Kind::WithMessage,
            Node::WithCode { .. } => Kind::WithCode,
        }
    }

    /// Get the short message of this link.
    ///
    /// A [`Kind::WithStack`] link has no message of its own and reports its
    /// inner error's.
    pub fn message(&self) -> &str {
        match self.node() {
            Node::Fundamental { message, .. }
            | Node::WithMessage { message, .. }
            | Node::WithCode { message, .. } => message,
            Node::WithStack { inner, .. } => inner.message(),
        }
    }

    /// Get the code of this link, if it is a [`Kind::WithCode`] link.
    pub fn code(&self) -> Option<Code> {
        match self.node() {
            Node::WithCode { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Get the first code found walking from this link towards the root.
    pub fn find_code(&self) -> Option<Code> {
        self.chain().find_map(Error::code)
    }

    /// Get the stack captured when this link was created.
    pub fn stack(&self) -> Option<&Stack> {
        match self.node() {
            Node::Fundamental { stack, .. }
            | Node::WithStack { stack, .. }
            | Node::WithCode { stack, .. } => Some(stack),
            Node::WithMessage { .. } => None,
        }
    }

    /// Get the direct cause of this link.
    pub fn cause(&self) -> Option<&Error> {
        match self.node() {
            Node::Fundamental { .. } => None,
            Node::WithStack { inner, .. } => Some(inner),
            Node::WithMessage { cause, .. } => Some(cause),
            Node::WithCode { cause, .. } => cause.as_ref(),
        }
    }

    /// Get the previous link for chain walking.
    ///
    /// Unlike [`Error::cause`], a [`Kind::WithStack`] link delegates to its
    /// inner error, so the message annotation that [`Error::wrap`] inserts
    /// under it is skipped.
    pub fn unwrap_link(&self) -> Option<&Error> {
        match self.node() {
            Node::Fundamental { .. } => None,
            Node::WithStack { inner, .. } => match inner.kind() {
                Kind::Fundamental => Some(inner),
                _ => inner.unwrap_link(),
            },
            Node::WithMessage { cause, .. } => Some(cause),
            Node::WithCode { cause, .. } => cause.as_ref(),
        }
    }

    /// Iterate over this link and all of its causes, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Get the innermost link of the chain.
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// Get the foreign error adopted by [`Error::from_std`] (if any).
    pub fn source_ref(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self.node() {
            Node::Fundamental { source, .. } => source.as_deref(),
            _ => None,
        }
    }
}

/// Iterator over the links of a chain, following [`Error::cause`].
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(Render::Short).fmt(f)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(Render::Verbose), f)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.unwrap_link() {
            Some(link) => Some(link),
            None => self
                .source_ref()
                .map(|e| e as &(dyn StdError + 'static)),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::from_std(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new() {
        let err = Error::new("disk full");
        assert_eq!(err.kind(), Kind::Fundamental);
        assert_eq!(err.message(), "disk full");
        assert_eq!(err.to_string(), "disk full");
        assert!(err.cause().is_none());
        assert!(err.code().is_none());
        assert!(err.stack().is_some());
    }

    #[test]
    fn test_with_code() {
        let err = Error::with_code(1, "x");
        assert_eq!(err.kind(), Kind::WithCode);
        assert_eq!(err.code(), Some(1));
        assert!(err.cause().is_none());
        assert!(err.unwrap_link().is_none());
    }

    #[test]
    fn test_with_stack_plain() {
        let err = Error::new("root").with_stack();
        assert_eq!(err.kind(), Kind::WithStack);
        assert_eq!(err.message(), "root");
        assert_eq!(err.cause().map(Error::kind), Some(Kind::Fundamental));
    }

    #[test]
    fn test_with_stack_keeps_code() {
        let coded = Error::with_code(7, "classified");
        let err = coded.clone().with_stack();
        assert_eq!(err.kind(), Kind::WithCode);
        assert_eq!(err.code(), Some(7));
        assert_eq!(err.message(), "classified");
        assert!(Arc::ptr_eq(&err.cause().unwrap().node, &coded.node));
    }

    #[test]
    fn test_wrap_plain_inserts_annotation() {
        let err = Error::new("root").wrap("context");
        assert_eq!(err.kind(), Kind::WithStack);
        assert_eq!(err.message(), "context");

        let annotation = err.cause().unwrap();
        assert_eq!(annotation.kind(), Kind::WithMessage);
        assert!(annotation.stack().is_none());
        assert_eq!(annotation.cause().unwrap().message(), "root");
    }

    #[test]
    fn test_with_message_drops_code() {
        let err = Error::with_code(7, "classified").with_message("note");
        assert_eq!(err.kind(), Kind::WithMessage);
        assert_eq!(err.code(), None);
        assert_eq!(err.find_code(), Some(7));
        assert!(err.stack().is_none());
    }

    #[test]
    fn test_wrapc_overrides_code() {
        let err = Error::with_code(7, "inner").wrapc(9, "outer");
        assert_eq!(err.code(), Some(9));
        assert_eq!(err.cause().unwrap().code(), Some(7));
    }

    #[test]
    fn test_unwrap_link_skips_annotation() {
        let root = Error::new("root");
        let err = root.clone().wrap("context");

        assert_eq!(err.cause().unwrap().kind(), Kind::WithMessage);
        let link = err.unwrap_link().unwrap();
        assert!(Arc::ptr_eq(&link.node, &root.node));
    }

    #[test]
    fn test_unwrap_link_over_fundamental() {
        let root = Error::new("root");
        let err = root.clone().with_stack();
        assert!(Arc::ptr_eq(&err.unwrap_link().unwrap().node, &root.node));
    }

    #[test]
    fn test_from_std_adopts_foreign() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
        let err = Error::from(io_err);
        assert_eq!(err.kind(), Kind::Fundamental);
        assert_eq!(err.message(), "config.toml missing");
        assert!(err.source_ref().is_some());
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn test_from_std_passes_error_through() {
        let err = Error::with_code(3, "kept");
        let again = Error::from_std(err.clone());
        assert!(Arc::ptr_eq(&again.node, &err.node));
    }

    #[test]
    fn test_chain_and_root_cause() {
        let err = Error::new("root").wrap("mid").with_message("top");
        let kinds: Vec<Kind> = err.chain().map(Error::kind).collect();
        assert_eq!(
            kinds,
            vec![
                Kind::WithMessage,
                Kind::WithStack,
                Kind::WithMessage,
                Kind::Fundamental
            ]
        );
        assert_eq!(err.root_cause().message(), "root");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<Error>();
    }
}
