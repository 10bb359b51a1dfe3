//! Login and the authenticated session

use crate::common::config::{Config, Credentials, MissingFieldPolicy};
use crate::common::{string_field, Error, Result};

use super::client::ApiClient;
use super::types::LoginRequest;

/// Authentication endpoint
pub const AUTH_PATH: &str = "/api/User/Authentication";

/// JSON field holding the bearer token in the login response
const TOKEN_FIELD: &str = "accessToken";

/// Extract a string field according to the missing-field policy
pub fn extract_field(
    value: &serde_json::Value,
    field: &str,
    policy: MissingFieldPolicy,
) -> Result<String> {
    match (string_field(value, field), policy) {
        (Some(s), _) => Ok(s),
        (None, MissingFieldPolicy::Empty) => {
            tracing::warn!(field, "Response field missing, using empty string");
            Ok(String::new())
        }
        (None, MissingFieldPolicy::Fail) => Err(Error::missing_field(field)),
    }
}

/// Obtain a bearer token by posting credentials to the authentication endpoint
///
/// `login_client` must not carry a token. A non-JSON response is always an error;
/// a missing `accessToken` follows `policy`.
pub async fn authenticate(
    login_client: &ApiClient,
    credentials: &Credentials,
    policy: MissingFieldPolicy,
) -> Result<String> {
    tracing::info!(username = %credentials.username, "Authenticating");

    let response = login_client
        .post(
            AUTH_PATH,
            &LoginRequest {
                username: &credentials.username,
                password: &credentials.password,
            },
        )
        .await?;

    if !(200..300).contains(&response.status) {
        tracing::warn!(status = response.status, "Authentication returned non-success status");
    }

    let json = response.json()?;
    let token = extract_field(&json, TOKEN_FIELD, policy)?;

    tracing::debug!(token_len = token.len(), "Received access token");
    Ok(token)
}

/// Authenticated client shared by every step of a suite run
#[derive(Debug)]
pub struct Session {
    client: ApiClient,
}

impl Session {
    /// Authenticate with the configured credentials and build the session client
    pub async fn open(config: &Config) -> Result<Self> {
        let timeout = config.timeouts.request();
        let login_client = ApiClient::new(&config.server.base_url, timeout)?;

        let token = authenticate(
            &login_client,
            &config.credentials,
            config.suite.missing_fields,
        )
        .await?;

        let client = ApiClient::new(&config.server.base_url, timeout)?.with_token(token);
        tracing::debug!(
            base_url = %client.base_url(),
            authenticated = client.is_authenticated(),
            "Session opened"
        );

        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn from_client(client: ApiClient) -> Self {
        Self { client }
    }

    /// Client carrying the bearer token
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Release the client and its connection pool
    pub fn close(self) {
        tracing::debug!(base_url = %self.client.base_url(), "Closing session");
        drop(self.client);
    }
}
