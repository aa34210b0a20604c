//! Call-stack snapshots taken when an error link is created.
//!
//! Capturing only records program counters. Symbols are resolved the first
//! time the snapshot is rendered and cached, so errors that are never
//! printed verbosely never pay for symbolization.

use std::fmt;
use std::sync::OnceLock;

use backtrace::{Backtrace, BacktraceFrame};

/// Path prefixes of frames that belong to the stack walker or to this crate's
/// constructors and combinators. They are trimmed from the head of a
/// snapshot so the first frame is the caller's own code.
const LIBRARY_PATHS: &[&str] = &[
    "backtrace::",
    "werrors::stack::",
    "werrors::error::Error",
    "werrors::ops::",
];

/// One resolved location of a stack snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    function: String,
    file: Option<String>,
    line: Option<u32>,
}

impl Frame {
    /// Demangled function name, without the symbol hash.
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\t{}\n\t\t", self.function)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{file}:{line}"),
            (Some(file), None) => f.write_str(file),
            (None, _) => f.write_str("<unknown>"),
        }
    }
}

/// An immutable call-stack snapshot, newest call first.
pub struct Stack {
    raw: Vec<BacktraceFrame>,
    resolved: OnceLock<Vec<Frame>>,
}

impl Stack {
    /// Snapshot the current call stack.
    ///
    /// Never fails: when the platform cannot walk the stack the snapshot is
    /// simply empty.
    #[inline(never)]
    pub fn capture() -> Self {
        const MAX_DEPTH: usize = 64;

        let mut raw = Vec::with_capacity(MAX_DEPTH);
        backtrace::trace(|frame| {
            raw.push(BacktraceFrame::from(frame.clone()));
            raw.len() < MAX_DEPTH
        });

        Self {
            raw,
            resolved: OnceLock::new(),
        }
    }

    /// The resolved frames of this snapshot, caller first.
    ///
    /// Frames without a symbol name are omitted.
    pub fn frames(&self) -> &[Frame] {
        self.resolved.get_or_init(|| {
            let frames = resolve(&self.raw);
            tracing::trace!(
                captured = self.raw.len(),
                kept = frames.len(),
                "resolved stack snapshot"
            );
            frames
        })
    }

    pub fn is_empty(&self) -> bool {
        self.frames().is_empty()
    }
}

impl fmt::Display for Stack {
    /// Writes every frame as `\n\t<function>\n\t\t<file>:<line>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in self.frames() {
            write!(f, "\n{frame}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("captured", &self.raw.len())
            .field("resolved", &self.resolved.get().map(Vec::len))
            .finish()
    }
}

fn resolve(raw: &[BacktraceFrame]) -> Vec<Frame> {
    let mut trace = Backtrace::from(raw.to_vec());
    trace.resolve();

    let mut frames = Vec::new();
    for frame in trace.frames() {
        for symbol in frame.symbols() {
            let Some(name) = symbol.name() else {
                continue;
            };
            frames.push(Frame {
                function: format!("{name:#}"),
                file: symbol.filename().map(|path| path.display().to_string()),
                line: symbol.lineno(),
            });
        }
    }

    // Everything up to the deepest library frame was called on behalf of
    // the caller's constructor call.
    if let Some(last) = frames.iter().rposition(|f| is_library_frame(&f.function)) {
        frames.drain(..=last);
    }
    frames
}

fn is_library_frame(function: &str) -> bool {
    owner_paths(function).any(|owner| LIBRARY_PATHS.iter().any(|path| owner.starts_with(path)))
}

/// Paths whose code a frame runs: the function path itself, or for a
/// qualified `<Type as Trait>::method` the implementing type and the trait.
/// Generic arguments never own a frame.
fn owner_paths(function: &str) -> impl Iterator<Item = &str> {
    let owners = match function.strip_prefix('<').and_then(split_qualified) {
        Some((self_ty, trait_path)) => [Some(self_ty), trait_path],
        None => [Some(function), None],
    };
    owners.into_iter().flatten()
}

/// Split the body of `<Type as Trait>::rest` (leading `<` already removed)
/// into `Type` and `Trait`. `<Type>::rest` yields no trait.
fn split_qualified(body: &str) -> Option<(&str, Option<&str>)> {
    let mut depth = 0usize;
    let mut prev = '\0';
    let mut split = None;
    for (at, ch) in body.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' if prev == '-' => {}
            '>' if depth == 0 => {
                let inner = &body[..at];
                return Some(match split {
                    Some(i) => (&inner[..i], Some(&inner[i + " as ".len()..])),
                    None => (inner, None),
                });
            }
            '>' => depth -= 1,
            ' ' if depth == 0 && split.is_none() && body[at..].starts_with(" as ") => {
                split = Some(at);
            }
            _ => {}
        }
        prev = ch;
    }
    None
}
