//! Error types for the Foody suite
//!
//! Messages carry expected and actual values so a failed step can be
//! diagnosed from the report alone.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Longest body excerpt kept in an unexpected-status error
const BODY_EXCERPT_LEN: usize = 200;

/// Main error type for the Foody suite
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    // === Response Errors ===
    #[error("Expected status {expected}, got {actual}. Body: {body}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("Response body is not valid JSON: {0}")]
    MalformedBody(String),

    #[error("Response is missing string field '{field}'")]
    MissingField { field: String },

    // === Scenario Errors ===
    #[error("Step '{step}' requires {requires}, which an earlier step did not produce")]
    MissingPrecondition { step: String, requires: String },

    #[error("Test assertion failed: {0}")]
    TestAssertion(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unexpected status error, keeping only the head of the body
    pub fn unexpected_status(expected: u16, actual: u16, body: &str) -> Self {
        let body = if body.chars().count() > BODY_EXCERPT_LEN {
            let head: String = body.chars().take(BODY_EXCERPT_LEN).collect();
            format!("{head}...")
        } else {
            body.to_string()
        };
        Self::UnexpectedStatus {
            expected,
            actual,
            body,
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    /// Create a missing precondition error
    pub fn missing_precondition(step: &str, requires: &str) -> Self {
        Self::MissingPrecondition {
            step: step.to_string(),
            requires: requires.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_truncates_long_bodies() {
        let body = "x".repeat(500);
        let err = Error::unexpected_status(201, 500, &body);
        match err {
            Error::UnexpectedStatus { body, .. } => {
                assert_eq!(body.len(), BODY_EXCERPT_LEN + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_status_message() {
        let err = Error::unexpected_status(200, 404, "not here");
        assert_eq!(
            err.to_string(),
            "Expected status 200, got 404. Body: not here"
        );
    }

    #[test]
    fn test_missing_precondition_message() {
        let err = Error::missing_precondition("Edit food title", "a created food id");
        assert!(err.to_string().contains("Edit food title"));
        assert!(err.to_string().contains("a created food id"));
    }
}
