use std::process::ExitCode;

use clap::Parser;
use werrors::Render;
use werrors_cli::{Cli, run};

fn main() -> ExitCode {
    let args = Cli::parse();

    match run(&args) {
        Ok(Some(code)) => {
            println!("code={code}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e.display(Render::Verbose));
            ExitCode::FAILURE
        }
    }
}
