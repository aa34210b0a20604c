//! Logging configuration.

use crate::TextFormatter;

/// Options for the log subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    /// An `EnvFilter` directive, e.g. `info` or `werrdemo=debug,warn`.
    pub filter: String,
    pub disable_colors: bool,
    pub ignore_basic_fields: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            disable_colors: false,
            ignore_basic_fields: false,
        }
    }
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_disable_colors(mut self, disable: bool) -> Self {
        self.disable_colors = disable;
        self
    }

    pub fn with_ignore_basic_fields(mut self, ignore: bool) -> Self {
        self.ignore_basic_fields = ignore;
        self
    }

    /// Apply `RUST_LOG` and `NO_COLOR` from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `RUST_LOG` and `NO_COLOR` using `lookup` to read variables.
    ///
    /// A non-empty `RUST_LOG` replaces the filter. A non-empty `NO_COLOR`
    /// disables colors.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(filter) = lookup("RUST_LOG").filter(|v| !v.is_empty()) {
            self.filter = filter;
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.disable_colors = true;
        }
        self
    }

    pub fn formatter(&self) -> TextFormatter {
        TextFormatter::new()
            .with_disable_colors(self.disable_colors)
            .with_ignore_basic_fields(self.ignore_basic_fields)
    }
}
