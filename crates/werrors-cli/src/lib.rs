//! werrdemo: build a classified error chain and log it.
//!
pub mod options;

use clap::Parser;
use werrors::{Code, Error, Render};

pub use options::{ChainOptions, OutputOptions};

#[derive(Parser, Debug)]
#[command(
    name = "werrdemo",
    about = "werrdemo: build a classified error chain and log it",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub chain: ChainOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Main entry point: install logging, build the chain, log it.
pub fn run(args: &Cli) -> werrors::Result<Option<Code>> {
    wlog::init(&args.output.log_options())?;
    let err = build_chain(&args.chain);
    Ok(report(&err, args.output.render()))
}

/// Build the demo chain described by `opts`.
///
/// The root is a fresh classified error. Wraps are applied first, then
/// annotations, then the optional reclassification.
pub fn build_chain(opts: &ChainOptions) -> Error {
    let mut err = werrors::with_code(opts.code, opts.message.as_str());
    for message in &opts.wraps {
        err = err.wrap(message.as_str());
    }
    for message in &opts.annotations {
        err = err.with_message(message.as_str());
    }
    if let Some(code) = opts.reclassify {
        err = err.wrapc(code, format!("reclassified as {code}"));
    }
    err
}

/// Log `err` at error level and return the code the chain resolves to.
pub fn report(err: &Error, mode: Render) -> Option<Code> {
    let code = err.find_code();
    tracing::error!("{}", err.display(mode));
    tracing::debug!(kind = %err.kind(), links = err.chain().count(), "chain reported");
    code
}
