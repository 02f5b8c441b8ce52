//! Locations of the fixture documents shipped at the workspace root.

/// Prefix of every shipped fixture document, ending in a separator.
pub const FIXTURE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/");

/// Schema every shipped fixture document must satisfy.
pub const FIXTURE_DOCUMENT_SCHEMA: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/fixture-document.schema.json"
);

/// Type names with a shipped fixture document.
pub const FIXTURE_TYPES: [&str; 7] = [
    "array", "boolean", "integer", "null", "number", "object", "string",
];

/// Path of the shipped fixture document for `type_name`.
pub fn fixture_path(type_name: &str) -> String {
    format!("{FIXTURE_DIR}{type_name}.json")
}
