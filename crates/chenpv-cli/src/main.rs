use std::process::ExitCode;

use chenpv_cli::{Cli, logging, run};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("chen-pv: {err:#}");
            ExitCode::FAILURE
        }
    }
}
