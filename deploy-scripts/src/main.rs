use std::process::ExitCode;

use clap::Parser;
use deploy_scripts::{
    cli::Cli,
    reporter::{ConsoleReporter, Reporter},
    utils::init_logging,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let reporter = ConsoleReporter;
    match cli.run(&reporter).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            reporter.error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}
