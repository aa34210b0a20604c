//! Command-line options for werrdemo.

use clap::Args;
use werrors::{Code, Render};

/// How the demo error chain is built.
#[derive(Args, Debug, Clone)]
pub struct ChainOptions {
    /// Classification code of the root error.
    #[arg(long, default_value_t = 101101)]
    pub code: Code,

    /// Message of the root error.
    #[arg(long, default_value = "unreconized Authorization header")]
    pub message: String,

    /// Wrap the chain with a message, keeping its code (repeatable).
    #[arg(long = "wrap", value_name = "TEXT", action = clap::ArgAction::Append)]
    pub wraps: Vec<String>,

    /// Annotate the chain with a message, without a stack (repeatable).
    /// Applied after every --wrap.
    #[arg(long = "annotate", value_name = "TEXT", action = clap::ArgAction::Append)]
    pub annotations: Vec<String>,

    /// Reclassify the final chain with a new code.
    #[arg(long, value_name = "CODE")]
    pub reclassify: Option<Code>,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            code: 101101,
            message: "unreconized Authorization header".to_string(),
            wraps: Vec::new(),
            annotations: Vec::new(),
            reclassify: None,
        }
    }
}

/// How the chain is logged.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputOptions {
    /// Log the whole chain with call stacks instead of the short message.
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable ANSI colors in log lines.
    #[arg(long)]
    pub no_color: bool,

    /// Log only the message, without time, level and call site.
    #[arg(long)]
    pub plain: bool,
}

impl ChainOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wrap(mut self, message: impl Into<String>) -> Self {
        self.wraps.push(message.into());
        self
    }

    pub fn with_annotation(mut self, message: impl Into<String>) -> Self {
        self.annotations.push(message.into());
        self
    }

    pub fn with_reclassify(mut self, code: Code) -> Self {
        self.reclassify = Some(code);
        self
    }
}

impl OutputOptions {
    pub fn render(&self) -> Render {
        if self.verbose {
            Render::Verbose
        } else {
            Render::Short
        }
    }

    pub fn log_options(&self) -> wlog::LogOptions {
        wlog::LogOptions::new()
            .with_disable_colors(self.no_color)
            .with_ignore_basic_fields(self.plain)
            .with_env()
    }
}
