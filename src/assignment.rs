/// Byte range of a scanned assignment within its source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first byte (start of the leading whitespace).
    pub start: usize,
    /// Offset one past the last byte (end of line, newline excluded).
    pub end: usize,
    /// 1-based line on which the assignment starts.
    pub line: usize,
}

/// How the value of an assignment was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    /// `KEY=value`
    Unquoted,
    /// `KEY='value'`
    Single,
    /// `KEY="value"`
    Double,
}

/// One assignment occurrence as it appears in the source text.
///
/// All text fields borrow from the scanned buffer. `body` is the raw
/// payload: no escapes are processed and no variables are expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAssignment<'a> {
    /// Leading whitespace before the key (or `export`).
    pub prefix: &'a str,
    /// Whether the line started with the `export` keyword.
    pub exported: bool,
    pub key: &'a str,
    pub quote: QuoteKind,
    /// Value payload. For unquoted values this runs up to `#` or the end
    /// of the line and keeps any trailing whitespace.
    pub body: &'a str,
    /// Everything after the value up to the end of the line.
    pub postfix: &'a str,
    pub span: Span,
}

impl RawAssignment<'_> {
    /// Trailing whitespace of an unquoted body, empty for quoted values.
    #[must_use]
    pub fn trailing_whitespace(&self) -> &str {
        match self.quote {
            QuoteKind::Unquoted => {
                let trimmed = self.body.trim_end();
                &self.body[trimmed.len()..]
            }
            QuoteKind::Single | QuoteKind::Double => "",
        }
    }
}

/// Check a name against `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
