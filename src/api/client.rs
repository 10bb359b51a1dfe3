//! HTTP client adapter for the Foody API

use std::time::Duration;

use reqwest::{Method, Url};
use serde::Serialize;

use crate::common::{Error, Result};

/// Status code and raw body of a completed request
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.body).map_err(|e| Error::MalformedBody(e.to_string()))
    }

    /// Whether the body contains `text` verbatim
    pub fn contains(&self, text: &str) -> bool {
        self.body.contains(text)
    }

    /// Fail with `UnexpectedStatus` unless the status equals `expected`
    pub fn expect_status(&self, expected: u16) -> Result<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(Error::unexpected_status(expected, self.status, &self.body))
        }
    }
}

/// Client bound to one base URL, optionally carrying a bearer token
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url`
    ///
    /// `timeout` applies to every request; the transport default is used when `None`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| Error::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let mut builder = reqwest::Client::builder().user_agent("foody-e2e");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: parsed,
            token: None,
        })
    }

    /// Attach a bearer token to every subsequent request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL requests are joined onto
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Whether a bearer token is installed
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Join a request path onto the base URL with exactly one separator
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    /// Issue a request, serializing `body` as JSON when present
    pub async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(%method, %url, "Sending request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(%method, %url, status, bytes = body.len(), "Received response");

        Ok(ApiResponse { status, body })
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.execute::<()>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.execute(Method::POST, path, Some(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.execute(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.execute::<()>(Method::DELETE, path, None).await
    }
}
