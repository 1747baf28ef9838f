//! Read, edit, and run commands with `.env` files.
//!
//! The parser resolves a dotenv buffer into its variables (quotes,
//! escapes, comments, `export`, multi-line values and `$NAME` expansion),
//! while the editor rewrites a single assignment and leaves every other
//! byte of the file untouched.
//!
//! # Quick start
//!
//! ## Read variables
//!
//! ```
//! use dotenv_cli::parse;
//!
//! let vars = parse("HOST=localhost\nURL=\"http://${HOST}:8080\" # dev\n");
//! assert_eq!(vars.get("URL"), Some("http://localhost:8080"));
//! ```
//!
//! ## Update a variable in place
//!
//! ```
//! use dotenv_cli::update;
//!
//! let input = "# database\nDB_USER=admin # default\nDB_PASS=\n";
//! let output = update(input, "DB_USER", "app user").unwrap();
//! assert_eq!(output, "# database\nDB_USER='app user' # default\nDB_PASS=\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use std::io;
use std::path::PathBuf;

pub mod assignment;
pub mod cli;
pub mod commands;
pub mod editor;
pub mod encoder;
pub mod logging;
pub mod parser;
pub mod scanner;
pub mod variables;

pub use assignment::{QuoteKind, RawAssignment, Span, is_valid_name};
pub use editor::{EditError, update};
pub use encoder::encode;
pub use parser::parse;
pub use scanner::scan;
pub use variables::VariablesMap;

/// Errors reported by the `get`, `set` and `run` commands.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to read file \"{}\": {source}", path.display())]
    FileNotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("The variable \"{name}\" was not found in \"{}\"", path.display())]
    VariableNotFound { name: String, path: PathBuf },
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("Unable to write file \"{}\": {source}", path.display())]
    FileNotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unable to run command \"{program}\": {source}")]
    CommandFailed {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Unable to write output: {0}")]
    Output(#[source] io::Error),
}
