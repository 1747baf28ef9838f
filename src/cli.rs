//! Command-line front-end.
//!
//! Output sinks are passed in rather than taken from the process, so the
//! whole command path can be driven from tests.

use std::io::Write;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use crate::Error;
use crate::assignment::is_valid_name;
use crate::commands;

/// CLI tool for interacting with .env files.
#[derive(Debug, Parser)]
#[command(name = "dotenv", version, about, long_about = None)]
pub struct Cli {
    /// Path of the .env file
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "DOTENV_FILE",
        default_value = ".env"
    )]
    pub file: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Print the value of a variable
    Get {
        /// Variable name
        name: String,
    },
    /// Set a variable, keeping the rest of the file as it is
    Set {
        /// Variable name
        name: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Run a command with the file's variables in its environment
    Run {
        /// Command and its arguments
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        command: Vec<String>,
    },
}

/// Execute a parsed command line and return the process exit code.
///
/// Values and help go to `stdout`, error messages to `stderr`.
#[must_use]
pub fn execute(cli: &Cli, stdout: &mut impl Write, stderr: &mut impl Write) -> i32 {
    match dispatch(cli, stdout) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            let _ = writeln!(stderr, "{e}");
            1
        }
    }
}

fn dispatch(cli: &Cli, stdout: &mut impl Write) -> Result<i32, Error> {
    let Some(command) = &cli.command else {
        write!(stdout, "{}", Cli::command().render_help()).map_err(Error::Output)?;
        return Ok(0);
    };

    match command {
        Command::Get { name } => {
            let value = commands::get_variable(&cli.file, name)?;
            writeln!(stdout, "{value}").map_err(Error::Output)?;
            Ok(0)
        }
        Command::Set { name, value } => {
            if !is_valid_name(name) && !name.contains('#') {
                tracing::warn!(name = %name, "name is not a valid identifier and cannot be read back");
            }
            commands::set_variable(&cli.file, name, value)?;
            Ok(0)
        }
        Command::Run { command } => commands::run_command(&cli.file, command),
    }
}
