//! Access layer for the Apple Music REST API
//!
//! This module provides the low-level HTTP client. Token acquisition is out
//! of scope: both tokens are supplied by the caller and sent as-is.

pub mod library;
pub mod schema;

use crate::error::{AppleMusicError, Result};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{Span, debug, info_span, warn};

/// Base URL of the Apple Music API
const API_BASE_URL: &str = "https://api.music.apple.com";

/// Web playback endpoint returning short-lived asset URLs
const PLAYBACK_URL: &str = "https://play.itunes.apple.com/WebObjects/MZPlay.woa/wa/webPlayback";

/// Low-level Apple Music API client
pub struct AppleMusicApi {
    /// HTTP client
    client: Client,
    /// Developer token (JWT), sent as bearer
    developer_token: String,
    /// Music user token
    user_token: String,
    base_url: String,
    playback_url: String,
    span: Span,
}

impl std::fmt::Debug for AppleMusicApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // tokens stay out of logs
        f.debug_struct("AppleMusicApi")
            .field("base_url", &self.base_url)
            .field("playback_url", &self.playback_url)
            .finish()
    }
}

impl AppleMusicApi {
    /// Creates a new API client with the two opaque credentials
    pub fn new(developer_token: impl Into<String>, user_token: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            developer_token: developer_token.into(),
            user_token: user_token.into(),
            base_url: API_BASE_URL.to_string(),
            playback_url: PLAYBACK_URL.to_string(),
            span: info_span!("applemusic.api"),
        })
    }

    /// Points the client at other endpoints (mock servers, proxies)
    pub fn with_base_urls(mut self, base_url: impl Into<String>, playback_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self.playback_url = playback_url.into();
        self
    }

    /// Attaches the client's log events to `span`
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn playback_url(&self) -> &str {
        &self.playback_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.developer_token)
            .header("Music-User-Token", &self.user_token)
    }

    /// Builds `base_url/seg1/seg2/...`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppleMusicError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| AppleMusicError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET on an API path given as segments under the base URL
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!(parent: &self.span, "GET {} with {} params", url, params.len());

        let request = self.authorize(self.client.get(url)).query(params);
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// POST a JSON body to the playback endpoint
    pub(crate) async fn post_playback<T: DeserializeOwned>(&self, body: &Value) -> Result<T> {
        debug!(parent: &self.span, "POST {}", self.playback_url);

        let request = self
            .authorize(self.client.post(&self.playback_url))
            .json(body);
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Processes the HTTP response
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let status_code = status.as_u16();

        debug!(parent: &self.span, "Response status: {}", status);

        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&text).unwrap_or(text);
            warn!(parent: &self.span, "API error ({}): {}", status_code, message);
            return Err(AppleMusicError::from_status_code(status_code, message));
        }

        // errors can also arrive with a 2xx status
        if let Ok(json) = serde_json::from_str::<Value>(&text) {
            if let Some(message) = error_message_value(&json) {
                warn!(parent: &self.span, "Apple Music API error: {}", message);
                return Err(AppleMusicError::ApiError {
                    code: status_code,
                    message,
                });
            }
        }

        serde_json::from_str(&text).map_err(|e| {
            warn!(parent: &self.span, "Failed to parse response: {}", e);
            AppleMusicError::JsonParse(e)
        })
    }
}

fn error_message(text: &str) -> Option<String> {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|json| error_message_value(&json))
}

/// Extracts the message of a JSON:API `errors` array or a playback `failureType`
fn error_message_value(json: &Value) -> Option<String> {
    if let Some(first) = json.get("errors").and_then(|e| e.as_array()).and_then(|a| a.first()) {
        let message = first
            .get("detail")
            .or_else(|| first.get("title"))
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        return Some(message.to_string());
    }

    json.get("failureType").map(|failure| {
        let code = failure
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| failure.to_string());
        let message = json
            .get("customerMessage")
            .and_then(|m| m.as_str())
            .unwrap_or("Playback refused");
        format!("{} (failure {})", message, code)
    })
}
