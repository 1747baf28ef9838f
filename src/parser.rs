//! Resolve scanned assignments into variable values.
//!
//! Single-quoted values are taken literally. Double-quoted and unquoted
//! values go through escape processing and `$NAME` expansion against the
//! variables declared earlier in the file.

use crate::assignment::{QuoteKind, RawAssignment};
use crate::scanner::scan;
use crate::variables::VariablesMap;

/// Parse dotenv text into its resolved variables.
///
/// Never fails: anything that is not an assignment is ignored. When a
/// name is declared twice the later value wins.
#[must_use]
pub fn parse(input: &str) -> VariablesMap {
    let mut variables = VariablesMap::new();
    for assignment in scan(input) {
        let value = resolve(&assignment, &variables);
        variables.insert(assignment.key, value);
    }
    variables
}

/// Compute the value of one assignment given the variables before it.
#[must_use]
pub fn resolve(assignment: &RawAssignment<'_>, variables: &VariablesMap) -> String {
    match assignment.quote {
        // inverse of the quoting `encode` applies; other backslashes stay
        QuoteKind::Single => assignment.body.replace("\\'", "'"),
        QuoteKind::Double => interpolate(assignment.body, variables),
        QuoteKind::Unquoted => interpolate(assignment.body.trim_end(), variables),
    }
}

/// Apply escape processing and variable expansion to a raw value.
#[must_use]
pub fn interpolate(raw: &str, variables: &VariablesMap) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '\\' => {
                let (text, consumed) = unescape(rest);
                out.push_str(text);
                rest = &rest[consumed..];
            }
            '$' => {
                let (value, consumed) = expand_reference(rest, variables)
                    .unwrap_or_else(|| ("$".to_string(), 1));
                out.push_str(&value);
                rest = &rest[consumed..];
            }
            _ => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    out
}

/// `input` starts with a backslash.
fn unescape(input: &str) -> (&'static str, usize) {
    match input.as_bytes().get(1) {
        Some(b'n') => ("\n", 2),
        Some(b'r') => ("\r", 2),
        Some(b't') => ("\t", 2),
        Some(b'"') => ("\"", 2),
        Some(b'\'') => ("'", 2),
        Some(b'$') => ("$", 2),
        _ => ("\\", 1),
    }
}

/// Expand a `$NAME`, `${NAME}` or `:-default` reference at the start of
/// `input`. Returns the substituted text and the number of bytes consumed,
/// or `None` when the `$` does not start a well-formed reference.
fn expand_reference(input: &str, variables: &VariablesMap) -> Option<(String, usize)> {
    let after_dollar = &input[1..];

    if let Some(inner) = after_dollar.strip_prefix('{') {
        let name_len = name_length(inner)?;
        let name = &inner[..name_len];
        let tail = &inner[name_len..];
        // 2 for "${"
        let consumed_name = 2 + name_len;

        if tail.starts_with('}') {
            return Some((lookup(name, variables).unwrap_or_default(), consumed_name + 1));
        }

        let default_body = tail.strip_prefix(":-")?;
        let close = matching_brace(default_body)?;
        let value = lookup(name, variables)
            .unwrap_or_else(|| interpolate(&default_body[..close], variables));
        return Some((value, consumed_name + 2 + close + 1));
    }

    let name_len = name_length(after_dollar)?;
    let name = &after_dollar[..name_len];

    if let Some(default) = after_dollar[name_len..].strip_prefix(":-") {
        // without braces the default runs to the end of the value
        let value = lookup(name, variables).unwrap_or_else(|| interpolate(default, variables));
        return Some((value, input.len()));
    }

    Some((lookup(name, variables).unwrap_or_default(), 1 + name_len))
}

/// Non-empty value of a previously declared variable.
fn lookup(name: &str, variables: &VariablesMap) -> Option<String> {
    variables
        .get(name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn name_length(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    if !bytes
        .first()
        .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_')
    {
        return None;
    }
    Some(
        bytes
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count(),
    )
}

/// Offset of the `}` closing a brace that was opened just before `input`.
fn matching_brace(input: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in input.bytes().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> VariablesMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn parse_basic() {
        let map = parse("BASIC=basic\nOTHER='x'\n");
        assert_eq!(map.get("BASIC"), Some("basic"));
        assert_eq!(map.get("OTHER"), Some("x"));
    }

    #[test]
    fn later_duplicate_wins() {
        let map = parse("A=first\nA=second\n");
        assert_eq!(map.get("A"), Some("second"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn unquoted_is_trimmed() {
        let map = parse("A=  value with space   # comment\n");
        assert_eq!(map.get("A"), Some("value with space"));
    }

    #[test]
    fn unquoted_keeps_leading_unicode_space() {
        let map = parse("A=\u{a0}x \nB=\u{3000}y\t\n");
        assert_eq!(map.get("A"), Some("\u{a0}x"));
        assert_eq!(map.get("B"), Some("\u{3000}y"));
    }

    #[test]
    fn single_quoted_backslashes() {
        let map = parse("DIR='C:\\dir\\'\nQ='a\\\\'b'\nN='x\\y'\n");
        assert_eq!(map.get("DIR"), Some("C:\\dir\\"));
        assert_eq!(map.get("Q"), Some("a\\'b"));
        assert_eq!(map.get("N"), Some("x\\y"));
    }

    #[test]
    fn single_quotes_are_literal() {
        let map = parse("X=1\nA='$X \\n ${X}'\nB='it\\'s'\n");
        assert_eq!(map.get("A"), Some("$X \\n ${X}"));
        assert_eq!(map.get("B"), Some("it's"));
    }

    #[test]
    fn double_quote_escapes() {
        let map = parse(r#"A="a\nb\tc \"q\" \'s\' \x""#);
        assert_eq!(map.get("A"), Some("a\nb\tc \"q\" 's' \\x"));
    }

    #[test]
    fn unquoted_escapes() {
        let map = parse(r"A=hello\nworld");
        assert_eq!(map.get("A"), Some("hello\nworld"));
    }

    #[test]
    fn expands_simple_reference() {
        assert_eq!(interpolate("$A", &vars(&[("A", "42")])), "42");
        assert_eq!(interpolate("${A}", &vars(&[("A", "42")])), "42");
        assert_eq!(interpolate("x${A}y", &vars(&[("A", "42")])), "x42y");
    }

    #[test]
    fn unset_reference_is_empty() {
        assert_eq!(interpolate("<$MISSING>", &VariablesMap::new()), "<>");
        assert_eq!(interpolate("<${MISSING}>", &VariablesMap::new()), "<>");
    }

    #[test]
    fn defaults() {
        let set = vars(&[("A", "42")]);
        let unset = VariablesMap::new();
        assert_eq!(interpolate("${A:-fallback}", &set), "42");
        assert_eq!(interpolate("${A:-fallback}", &unset), "fallback");
        assert_eq!(interpolate("$A:-fallback", &set), "42");
        assert_eq!(interpolate("$A:-fallback", &unset), "fallback");
    }

    #[test]
    fn empty_value_takes_default() {
        assert_eq!(interpolate("${A:-d}", &vars(&[("A", "")])), "d");
    }

    #[test]
    fn nested_defaults() {
        let map = vars(&[("C", "deep")]);
        assert_eq!(interpolate("${A:-${B:-x}}", &map), "x");
        assert_eq!(interpolate("${A:-${C:-x}}", &map), "deep");
        assert_eq!(interpolate("${A:-a}-${B:-b}", &map), "a-b");
    }

    #[test]
    fn escaped_dollar_is_literal() {
        let map = vars(&[("A", "42")]);
        assert_eq!(interpolate(r"\$A", &map), "$A");
        assert_eq!(interpolate(r"\${A}", &map), "${A}");
    }

    #[test]
    fn malformed_references_stay_literal() {
        let map = vars(&[("A", "42")]);
        assert_eq!(interpolate("cost: $5", &map), "cost: $5");
        assert_eq!(interpolate("${A", &map), "${A");
        assert_eq!(interpolate("${A:-x", &map), "${A:-x");
        assert_eq!(interpolate("$", &map), "$");
    }

    #[test]
    fn expansion_uses_file_order() {
        let map = parse("B=$A\nA=42\nC=$A\n");
        assert_eq!(map.get("B"), Some(""));
        assert_eq!(map.get("C"), Some("42"));
    }

    #[test]
    fn self_reference_does_not_loop() {
        let map = parse("A=x\nA=$A$A\n");
        assert_eq!(map.get("A"), Some("xx"));
    }

    #[test]
    fn non_ascii_values() {
        let map = parse("A=café\nB=ü\nC=\"ü $B\"");
        assert_eq!(map.get("A"), Some("café"));
        assert_eq!(map.get("C"), Some("ü ü"));
    }
}
