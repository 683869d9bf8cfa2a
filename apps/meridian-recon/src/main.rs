//! meridian-recon entry point.

use std::process::ExitCode;

use clap::Parser;
use meridian_recon::{init_tracing, run, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match run(&args) {
        Ok(summary) if args.strict && !summary.all_valid() => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
