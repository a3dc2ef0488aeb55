use std::process::ExitCode;

use clap::Parser;
use swatch::{logging, Cli};
use swatch_core::{PipelineError, RealEnv};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match swatch::run(&cli, &RealEnv, &mut std::io::stdout()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<PipelineError>() {
                Some(failure) => tracing::error!(kind = failure.kind(), "run failed"),
                None => tracing::error!("run failed"),
            }
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
