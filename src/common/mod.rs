//! Common utilities shared by the API client, the scenario and the CLI

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

/// Read a string field from a JSON object
///
/// Returns `None` when the value is not an object, the field is absent,
/// or the field is not a string.
pub fn string_field(value: &serde_json::Value, field: &str) -> Option<String> {
    value.get(field)?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_field() {
        let value = json!({"accessToken": "abc", "count": 3});
        assert_eq!(string_field(&value, "accessToken").as_deref(), Some("abc"));
        assert_eq!(string_field(&value, "count"), None);
        assert_eq!(string_field(&value, "missing"), None);
        assert_eq!(string_field(&json!([1, 2]), "accessToken"), None);
    }
}
