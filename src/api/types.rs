//! Request payloads for the Foody API
//!
//! Field names follow the remote API's camelCase JSON.

use serde::Serialize;

/// Body of `POST /api/User/Authentication`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `POST /api/Food/Create`
#[derive(Debug, Clone, Serialize)]
pub struct FoodInput {
    pub name: String,
    pub description: String,
    /// Omitted entirely when `None`, to exercise required-field validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A single JSON-patch style operation sent to `PATCH /api/Food/Edit/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct PatchOperation {
    pub path: String,
    pub op: String,
    pub value: String,
}

impl PatchOperation {
    /// Replace the value at `path`
    pub fn replace(path: &str, value: &str) -> Self {
        Self {
            path: path.to_string(),
            op: "replace".to_string(),
            value: value.to_string(),
        }
    }
}
