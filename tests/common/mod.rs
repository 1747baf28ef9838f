#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use dotenv_cli::{parse, update};

/// Path of a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

/// Assert that `name` resolves to `expected` in the given fixture.
pub fn assert_value(file: &str, name: &str, expected: &str) {
    let vars = parse(&fixture(file));
    assert_eq!(
        vars.get(name),
        Some(expected),
        "unexpected value for {name} in {file}"
    );
}

/// Assert that `name` is not assigned in the given fixture.
pub fn assert_missing(file: &str, name: &str) {
    let vars = parse(&fixture(file));
    assert!(
        !vars.contains_key(name),
        "{name} should not be parsed from {file}, got {:?}",
        vars.get(name)
    );
}

/// Apply `update` to a fixture and compare with the expected text.
pub fn assert_update(file: &str, name: &str, value: &str, expected: &str) {
    let input = fixture(file);
    let output = update(&input, name, value).expect("update failed");
    assert_eq!(
        output, expected,
        "update mismatch:\n--- expected ---\n{expected}\n--- got ---\n{output}"
    );
}
