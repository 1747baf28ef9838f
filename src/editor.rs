//! In-place rewriting of a single assignment.
//!
//! Every byte outside the rewritten assignment is copied through
//! unchanged, so comments, blank lines, ordering and formatting survive.

use crate::encoder::encode;
use crate::scanner::scan;

/// Error produced when an edit cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The variable name would be read back as a comment.
    #[error("The variable name \"{name}\" contains invalid characters")]
    InvalidVariableName { name: String },
}

/// Set `name` to `value` in dotenv text, returning the new text.
///
/// The first assignment of `name` is replaced in place, keeping its
/// leading whitespace and inline comment. When `name` is not assigned
/// anywhere, `NAME=value` is appended on a new line.
///
/// # Errors
///
/// Returns `EditError::InvalidVariableName` if `name` contains `#`.
pub fn update(input: &str, name: &str, value: &str) -> Result<String, EditError> {
    validate_name(name)?;

    let line = format!("{name}={}", encode(value));
    let mut out = String::with_capacity(input.len() + line.len() + 2);
    let mut progress = 0;
    let mut found = false;

    for assignment in scan(input) {
        out.push_str(&input[progress..assignment.span.start]);
        progress = assignment.span.end;

        if assignment.key == name {
            tracing::debug!(name, line = assignment.span.line, "replacing assignment");
            out.push_str(assignment.prefix);
            out.push_str(&line);
            out.push_str(assignment.trailing_whitespace());
            out.push_str(assignment.postfix);
            found = true;
            break;
        }

        out.push_str(&input[assignment.span.start..assignment.span.end]);
    }

    out.push_str(&input[progress..]);

    if !found {
        tracing::debug!(name, "appending assignment");
        out.push('\n');
        out.push_str(&line);
        out.push('\n');
    }

    Ok(out)
}

/// Reject names that cannot be written as an assignment.
///
/// # Errors
///
/// Returns `EditError::InvalidVariableName` if `name` contains `#`.
pub fn validate_name(name: &str) -> Result<(), EditError> {
    if name.contains('#') {
        return Err(EditError::InvalidVariableName {
            name: name.to_string(),
        });
    }
    Ok(())
}
