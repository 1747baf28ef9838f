//! File and process operations behind the `get`, `set` and `run` commands.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use crate::Error;
use crate::editor::{update, validate_name};
use crate::parser::parse;
use crate::variables::VariablesMap;

/// Read and parse a dotenv file.
///
/// # Errors
///
/// Returns `Error::FileNotReadable` if the file cannot be read.
pub fn load(path: &Path) -> Result<VariablesMap, Error> {
    let content = read(path)?;
    let variables = parse(&content);
    tracing::debug!(path = %path.display(), count = variables.len(), "loaded variables");
    Ok(variables)
}

/// Look up the resolved value of one variable.
///
/// # Errors
///
/// Returns `Error::FileNotReadable` if the file cannot be read and
/// `Error::VariableNotFound` if the variable is not assigned.
pub fn get_variable(path: &Path, name: &str) -> Result<String, Error> {
    let variables = load(path)?;
    variables
        .get(name)
        .map(str::to_string)
        .ok_or_else(|| Error::VariableNotFound {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
}

/// Set one variable in a dotenv file, creating the file if needed.
///
/// # Errors
///
/// Returns `Error::Edit` for an invalid name (nothing is read or written),
/// `Error::FileNotReadable` when an existing file cannot be read, and
/// `Error::FileNotWritable` when the result cannot be written.
pub fn set_variable(path: &Path, name: &str, value: &str) -> Result<(), Error> {
    validate_name(name)?;

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "file not found, starting empty");
            String::new()
        }
        Err(source) => {
            return Err(Error::FileNotReadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let updated = update(&content, name, value)?;
    fs::write(path, updated).map_err(|source| Error::FileNotWritable {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), name, "variable set");
    Ok(())
}

/// Run a command with the file's variables layered over the inherited
/// environment. Returns the child's exit code.
///
/// # Errors
///
/// Returns `Error::FileNotReadable` if the file cannot be read and
/// `Error::CommandFailed` if the command is empty or cannot be started.
pub fn run_command(path: &Path, command: &[String]) -> Result<i32, Error> {
    let variables = load(path)?;

    let (program, args) = command.split_first().ok_or_else(|| Error::CommandFailed {
        program: String::new(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "no command given"),
    })?;

    tracing::debug!(program, ?args, "spawning command");
    let status = Command::new(program)
        .args(args)
        .envs(variables.iter())
        .status()
        .map_err(|source| Error::CommandFailed {
            program: program.clone(),
            source,
        })?;

    // terminated by a signal
    let code = status.code().unwrap_or(1);
    tracing::debug!(program, code, "command exited");
    Ok(code)
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::FileNotReadable {
        path: path.to_path_buf(),
        source,
    })
}
