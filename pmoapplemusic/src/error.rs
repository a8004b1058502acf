//! Error handling for the Apple Music backend

use thiserror::Error;

/// Result type for pmoapplemusic
pub type Result<T> = std::result::Result<T, AppleMusicError>;

/// Errors raised while resolving catalog URIs or talking to Apple Music
///
/// None of these reach the host: the capability implementations log them and
/// degrade to an empty result.
#[derive(Error, Debug)]
pub enum AppleMusicError {
    /// Empty URI
    #[error("Malformed URI: {0:?}")]
    MalformedUri(String),

    /// A track payload lacks its name or duration
    #[error("Incomplete track data for {id}: missing {missing}")]
    IncompleteTrackData { id: String, missing: &'static str },

    /// A track lookup did not return exactly one record
    #[error("Track not found: {id} ({found} records)")]
    TrackNotFound { id: String, found: usize },

    /// Playback data did not contain exactly one song entry with an asset
    #[error("Playback data unavailable for {id}: {reason}")]
    PlaybackDataUnavailable { id: String, reason: String },

    /// A collection or detail fetch returned no data
    #[error("Remote fetch returned no data: {0}")]
    RemoteFetchEmpty(String),

    /// Authentication failure (bad developer or user token)
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Resource not found on the remote side
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Too many requests
    #[error("Rate limit exceeded, please try again later")]
    RateLimitExceeded,

    /// Other Apple Music API error
    #[error("Apple Music API error (code {code}): {message}")]
    ApiError { code: u16, message: String },

    /// Unusable endpoint URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl AppleMusicError {
    /// Builds an API error from an HTTP status code and message
    pub fn from_status_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            401 | 403 => Self::Unauthorized(message.into()),
            404 => Self::NotFound(message.into()),
            429 => Self::RateLimitExceeded,
            _ => Self::ApiError {
                code,
                message: message.into(),
            },
        }
    }

    /// Whether the developer or user token was rejected
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AppleMusicError::Unauthorized(_))
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, AppleMusicError::RateLimitExceeded)
    }
}
