use std::process::ExitCode;

use clap::Parser;
use lingot::cli::{Arguments, ExitStatus};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    match lingot::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}

/// Diagnostics go to stderr; `LINGOT_LOG` takes precedence over `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("LINGOT_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
