// src/api/client.rs
//! HTTP transport for the X API.
//!
//! A thin wrapper around reqwest that attaches the right `Authorization`
//! header (bearer or OAuth 1.0a) and turns responses into JSON or errors.
//! Endpoint knowledge lives in `endpoints.rs`.

use super::context::AuthenticatedContext;
use super::parser;
use crate::auth;
use crate::constants::{RATE_LIMIT_RESET_HEADER, REQUEST_TIMEOUT_SECS, X_API_BASE_URL};
use crate::error::AppError;
use crate::types::{Credentials, ValidationError};
use reqwest::{header, Client, Method, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Client for the X API v2, holding the caller's authentication context.
#[derive(Debug, Clone)]
pub struct XHttpClient {
    client: Client,
    base_url: String,
    context: AuthenticatedContext,
}

impl XHttpClient {
    /// Creates a client against the public API.
    pub fn new(credentials: Credentials) -> Result<Self, AppError> {
        Self::with_base_url(credentials, X_API_BASE_URL)
    }

    /// Creates a client against another API root (used by tests).
    pub fn with_base_url(
        credentials: Credentials,
        base_url: impl Into<String>,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            context: AuthenticatedContext::new(credentials),
        })
    }

    pub fn context(&self) -> &AuthenticatedContext {
        &self.context
    }

    /// Replaces the authentication context, e.g. once the self ID is known.
    pub fn with_context(mut self, context: AuthenticatedContext) -> Self {
        self.context = context;
        self
    }

    /// Builds `<base>/<path>?<params>`.
    pub(crate) fn endpoint_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, AppError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| ValidationError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// App-only GET with the bearer token.
    pub async fn bearer_get(&self, url: Url) -> Result<Value, AppError> {
        log::debug!("GET {} (bearer)", url);
        let response = self
            .client
            .get(url)
            .header(
                header::AUTHORIZATION,
                auth::bearer_header(&self.context.credentials),
            )
            .send()
            .await?;
        handle_response(response).await
    }

    /// User-context request signed with OAuth 1.0a.
    pub async fn oauth_request(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        log::debug!("{} {} (oauth)", method, url);
        let authorization = auth::sign(&method, url.as_str(), &self.context.credentials, &[])?;

        let mut request = self
            .client
            .request(method, url)
            .header(header::AUTHORIZATION, authorization);
        if let Some(body) = body {
            // `json` also sets Content-Type: application/json
            request = request.json(body);
        }

        handle_response(request.send().await?).await
    }
}

/// Maps a raw response to JSON, a rate-limit signal, or a request failure.
pub async fn handle_response(response: Response) -> Result<Value, AppError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let reset_at = response
            .headers()
            .get(RATE_LIMIT_RESET_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        log::warn!("Rate limited by {} (resets at {})", response.url(), reset_at);
        return Err(AppError::RateLimited { reset_at });
    }

    let body = response.text().await?;
    log::debug!("Response {} ({} bytes)", status, body.len());
    parser::interpret_body(status.as_u16(), &body)
}
