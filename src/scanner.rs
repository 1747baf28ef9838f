//! Assignment scanner shared by the parser and the editor.
//!
//! Both consumers walk the same grammar so that `get` and `set` never
//! disagree about what counts as an assignment.

use crate::assignment::{QuoteKind, RawAssignment, Span};

const BOM: &str = "\u{FEFF}";

/// Scan dotenv text for assignments, in source order.
///
/// Never fails: lines that do not form an assignment (blank lines,
/// comments, invalid names) are skipped.
#[must_use]
pub fn scan(input: &str) -> Scanner<'_> {
    Scanner::new(input)
}

/// Iterator over the assignments of a dotenv buffer.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let start = if input.starts_with(BOM) { BOM.len() } else { 0 };
        Self {
            input,
            pos: start,
            line: 1,
        }
    }

    const fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn skip_blanks(&self, mut pos: usize) -> usize {
        while matches!(self.bytes().get(pos), Some(b' ' | b'\t')) {
            pos += 1;
        }
        pos
    }

    /// End of the line containing `from`, newline excluded.
    fn line_end(&self, from: usize) -> usize {
        self.input[from..]
            .find('\n')
            .map_or(self.input.len(), |offset| from + offset)
    }

    /// Move to `end` and past the newline that follows it, if any.
    fn advance_to(&mut self, end: usize) {
        self.line += self.input[self.pos..end].matches('\n').count();
        self.pos = end;
        if self.bytes().get(self.pos) == Some(&b'\n') {
            self.pos += 1;
            self.line += 1;
        }
    }

    fn match_at(&self, start: usize) -> Option<RawAssignment<'a>> {
        let prefix_end = self.skip_blanks(start);
        let exported_key = self.input[prefix_end..]
            .strip_prefix("export")
            .filter(|rest| rest.starts_with([' ', '\t']))
            .map(|rest| self.skip_blanks(self.input.len() - rest.len()));

        // `export=1` and `export FOO=1` are both valid lines
        exported_key
            .and_then(|key_start| self.match_assignment(start, prefix_end, key_start, true))
            .or_else(|| self.match_assignment(start, prefix_end, prefix_end, false))
    }

    fn match_assignment(
        &self,
        start: usize,
        prefix_end: usize,
        key_start: usize,
        exported: bool,
    ) -> Option<RawAssignment<'a>> {
        let key_end = self.read_name(key_start)?;
        let eq = self.skip_blanks(key_end);
        if self.bytes().get(eq) != Some(&b'=') {
            return None;
        }

        let value_start = self.skip_blanks(eq + 1);
        let (quote, body, value_end) = self.read_value(value_start);
        let end = self.line_end(value_end);

        Some(RawAssignment {
            prefix: &self.input[start..prefix_end],
            exported,
            key: &self.input[key_start..key_end],
            quote,
            body,
            postfix: &self.input[value_end..end],
            span: Span {
                start,
                end,
                line: self.line,
            },
        })
    }

    fn read_name(&self, start: usize) -> Option<usize> {
        let bytes = self.bytes();
        match bytes.get(start) {
            Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
            _ => return None,
        }

        let mut end = start + 1;
        while bytes
            .get(end)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            end += 1;
        }
        Some(end)
    }

    /// Returns the quote kind, the raw body and the offset just past the value.
    fn read_value(&self, start: usize) -> (QuoteKind, &'a str, usize) {
        if let Some(&quote @ (b'\'' | b'"')) = self.bytes().get(start) {
            if let Some(close) = self.find_closing(start + 1, quote) {
                let kind = if quote == b'\'' {
                    QuoteKind::Single
                } else {
                    QuoteKind::Double
                };
                let body = strip_edge_newlines(&self.input[start + 1..close]);
                return (kind, body, close + 1);
            }
            // unterminated quote: the quote becomes part of an unquoted value
        }

        let end = self.input[start..]
            .find(['#', '\n'])
            .map_or(self.input.len(), |offset| start + offset);
        (QuoteKind::Unquoted, &self.input[start..end], end)
    }

    fn find_closing(&self, pos: usize, quote: u8) -> Option<usize> {
        if quote == b'\'' {
            self.find_closing_single(pos)
        } else {
            self.find_closing_double(pos)
        }
    }

    /// Every backslash escapes the byte after it.
    fn find_closing_double(&self, mut pos: usize) -> Option<usize> {
        let bytes = self.bytes();
        while let Some(&b) = bytes.get(pos) {
            match b {
                b'\\' => pos += 2,
                b'"' => return Some(pos),
                _ => pos += 1,
            }
        }
        None
    }

    /// A backslash only matters right before a quote. `\'` is an escaped
    /// quote unless nothing but blanks and a comment follow it on the line,
    /// in which case the value ends in a backslash (`'C:\dir\'`).
    fn find_closing_single(&self, mut pos: usize) -> Option<usize> {
        let bytes = self.bytes();
        while let Some(&b) = bytes.get(pos) {
            match b {
                b'\\' if bytes.get(pos + 1) == Some(&b'\'') => {
                    if self.ends_value(pos + 2) {
                        return Some(pos + 1);
                    }
                    pos += 2;
                }
                b'\'' => return Some(pos),
                _ => pos += 1,
            }
        }
        None
    }

    /// Whether the rest of the line from `pos` is blanks, optionally
    /// followed by a comment holding no further quote.
    fn ends_value(&self, pos: usize) -> bool {
        let rest = self.input[pos..self.line_end(pos)].trim_end_matches('\r');
        let rest = rest.trim_start_matches([' ', '\t']);
        rest.is_empty() || (rest.starts_with('#') && !rest.contains('\''))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = RawAssignment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.input.len() {
            let start = self.pos;
            if let Some(assignment) = self.match_at(start) {
                tracing::trace!(
                    key = assignment.key,
                    line = assignment.span.line,
                    "scanned assignment"
                );
                self.advance_to(assignment.span.end);
                return Some(assignment);
            }
            let end = self.line_end(start);
            self.advance_to(end);
        }
        None
    }
}

fn strip_edge_newlines(body: &str) -> &str {
    let body = body.strip_prefix('\n').unwrap_or(body);
    body.strip_suffix('\n').unwrap_or(body)
}
