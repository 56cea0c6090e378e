mod cli;
mod command_handlers;
mod config;
mod current;
mod deps;
mod error;
mod fetch;
mod installer;
mod known_versions;
mod platform;
mod release;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "GOVM_LOG";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = match cli::try_parse_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => return cli::report_parse_error(&err),
    };
    match command_handlers::dispatch::dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
