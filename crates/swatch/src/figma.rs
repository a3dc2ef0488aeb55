//! HTTP document source for the Figma REST API.

use std::time::Duration;

use reqwest::blocking::Client;
use swatch_core::{Document, DocumentSource, FetchError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const TOKEN_HEADER: &str = "X-Figma-Token";

/// Fetches design documents with `GET {api_base}/v1/files/{key}`.
pub struct FigmaClient {
    http: Client,
    api_base: String,
    token: String,
}

impl FigmaClient {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("swatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| FetchError::Network(err.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.into(),
            token: token.into(),
        })
    }

    pub fn file_url(&self, key: &str) -> String {
        format!("{}/v1/files/{}", self.api_base.trim_end_matches('/'), key)
    }
}

impl DocumentSource for FigmaClient {
    fn fetch_document(&self, key: &str) -> Result<Document, FetchError> {
        let url = self.file_url(key);
        tracing::debug!(%url, "requesting design file");

        let response = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .map_err(|err| FetchError::Network(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| FetchError::Network(err.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        Document::from_json(&body).map_err(|err| FetchError::Parse(err.to_string()))
    }
}

/// Maps a non-success response to a [`FetchError`].
///
/// Figma error bodies look like `{"status": 403, "err": "Invalid token"}`;
/// when the body has no such message the raw body is used.
pub fn status_error(status: u16, body: &str) -> FetchError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("err")
                .or_else(|| value.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        401 | 403 => FetchError::Auth { status, message },
        _ => FetchError::Status { status, message },
    }
}
