//! CLI tool to read, set, and run commands with variables from .env files.

use std::process::ExitCode;

use clap::Parser;
use dotenv_cli::cli::{Cli, execute};
use dotenv_cli::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = execute(&cli, &mut std::io::stdout().lock(), &mut std::io::stderr().lock());

    // exit codes outside 0..=255 cannot be represented portably
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
