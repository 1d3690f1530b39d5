//! Delay badge command-line tool

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use delay_badge::args::Args;
use delay_badge::cli::{init_tracing, run};
use delay_badge::constants::*;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Malformed arguments (e.g. a bad timestamp) exit 1 like other failures
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_tracing(args.debug) {
        eprintln!("{}{}", ERR_TRACING, e);
    }

    match run(&args, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}{}", ERR_PREFIX, e);
            ExitCode::FAILURE
        }
    }
}
