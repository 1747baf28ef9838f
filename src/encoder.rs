//! Render values so the parser reads them back unchanged.

/// Encode a value for the right-hand side of an assignment.
///
/// Values containing a newline are double-quoted with `\n` escapes,
/// values with any other non-word character are single-quoted, and plain
/// words are written as-is.
#[must_use]
pub fn encode(value: &str) -> String {
    if value.contains('\n') {
        let escaped = value.replace('\n', "\\n").replace('"', "\\\"");
        format!("\"{escaped}\"")
    } else if value.chars().any(|c| !is_word_char(c)) {
        let escaped = value.replace('\'', "\\'");
        format!("'{escaped}'")
    } else {
        value.to_string()
    }
}

const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
