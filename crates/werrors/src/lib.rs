//! # werrors
//!
//! Error chains that keep their origin, their classification and their
//! context while they travel up through the layers of a program.
//!
//! ## Design Philosophy
//!
//! - **Chain**: every layer adds a link, the root cause is never lost
//! - **Code**: a numeric classification attached once with [`with_code`](fn@with_code)
//!   survives every generic [`wrap`] and [`with_stack`]; only [`wrapc`](fn@wrapc)
//!   may reclassify
//! - **Stack**: links created at a construction or wrap boundary capture the
//!   call stack eagerly and resolve it only when printed
//! - **Render**: the caller decides between a terse message and the full
//!   chain with stacks at the output site
//!
//! ## Usage
//!
//! ```rust
//! use werrors::{Render, ResultExt};
//!
//! fn find_user(name: &str) -> werrors::Result<u64> {
//!     Err(werrors::with_code!(404, "not found: {}", name))
//! }
//!
//! fn handler() -> werrors::Result<u64> {
//!     find_user("user").wrap("lookup failed")
//! }
//!
//! let err = handler().unwrap_err();
//! assert_eq!(err.code(), Some(404));
//! assert_eq!(err.render(Render::Short), "lookup failed");
//!
//! let verbose = err.render(Render::Verbose);
//! assert!(verbose.find("not found: user").unwrap() < verbose.find("lookup failed").unwrap());
//! ```
//!
//! ## Absent errors
//!
//! The free functions take `Option<Error>` and map `None` to `None`, so an
//! error that may or may not exist can be annotated without a check:
//!
//! ```rust
//! assert!(werrors::wrap(None, "context").is_none());
//! ```

mod error;
mod kind;
mod ops;
mod render;
mod stack;

pub use error::{Chain, Code, Error};
pub use kind::Kind;
pub use ops::{ResultExt, code_of, new, with_code, with_message, with_stack, wrap, wrapc};
pub use render::{Render, Rendered};
pub use stack::{Frame, Stack};

/// Result type alias using the chain Error
pub type Result<T> = std::result::Result<T, Error>;
