//! whetherman
//!
//! Weather forecasts in the terminal, powered by Open-Meteo.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use clap::Parser;
use presentation_cli::{Cli, error_hint, init_logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {e:#}");
            if let Some(hint) = error_hint(&e) {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        },
    }
}
