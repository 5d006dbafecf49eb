//! `partner-onboarding` - create or verify a partner onboarding
//!
//! Prints the outcome as a flat JSON object on stdout and exits with
//! success only for `SUCCESS` / `VERIFIED`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use onboarding_app::{execute, logging, AppContext, Command, USAGE};
use tracing::{debug, error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    logging::init_tracing();
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "could not load .env file"),
    }

    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(command) => command,
        Err(message) => {
            eprintln!("error: {message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = match onboarding_infra::config::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "configuration could not be loaded");
            return ExitCode::from(2);
        }
    };

    let context = AppContext::new(config);
    let report = match execute(&context, &command).await {
        Ok(report) => report,
        Err(err) => {
            error!(error = %format!("{err:#}"), "invocation failed");
            return ExitCode::from(2);
        }
    };

    match report.to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => {
            error!(error = %err, "outcome could not be rendered");
            return ExitCode::from(2);
        }
    }

    if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
