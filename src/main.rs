use std::env;

use clap::Parser;
use dotenvy::dotenv;

use beanlink::cli::Cli;
use beanlink::interfaces::cli::run_cli_command;
use beanlink::system::logging::{DEFAULT_LOG_LEVEL, init_logging};

fn main() {
    dotenv().ok();

    let level =
        env::var("BEANLINK_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    let _log_guard = init_logging(&level);

    let cli = Cli::parse();
    if let Err(e) = run_cli_command(cli.command) {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
}
