//! # PMOSource
//!
//! Host-facing contract for PMOMusic library backends.
//!
//! A backend owns a URI scheme (e.g. `applemusic`) and exposes two capabilities
//! to the host:
//!
//! - [`LibraryProvider`]: browse a hierarchy of [`Ref`]s and look up [`Track`]s
//! - [`PlaybackProvider`]: turn a track URI into a fetchable stream URL at play time
//!
//! The host registers backends once at startup in a [`BackendRegistry`] and
//! routes every request by the URI scheme prefix.
//!
//! ## Failure model
//!
//! The capability methods never fail. A backend logs what went wrong and
//! returns an empty result (`Vec::new()` or `None`), which the host treats as
//! "nothing found". Backends that want to expose a distinguishable failure do
//! so through their own inherent methods.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pmosource::BackendRegistry;
//! use std::sync::Arc;
//!
//! let registry = BackendRegistry::new();
//! registry.register(Arc::new(my_backend)).await?;
//!
//! let backend = registry.backend_for("applemusic:root").await?;
//! let refs = backend.library().browse("applemusic:root").await;
//! ```

pub mod models;
pub mod registry;

pub use async_trait::async_trait;
pub use models::{Album, Artist, Ref, RefType, Track};
pub use registry::BackendRegistry;

use std::fmt::Debug;
use std::sync::Arc;

/// Error types for backend registration and routing
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("No backend registered for URI scheme: {0}")]
    UnknownScheme(String),

    #[error("URI scheme already registered: {0}")]
    SchemeAlreadyRegistered(String),

    #[error("Invalid URI: {0:?}")]
    InvalidUri(String),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Library capability: navigation and track resolution
#[async_trait]
pub trait LibraryProvider: Debug + Send + Sync {
    /// The top-level directory of this backend
    fn root_directory(&self) -> Ref;

    /// Lists the children of `uri`. Unknown URIs and failures yield an empty list.
    async fn browse(&self, uri: &str) -> Vec<Ref>;

    /// Resolves `uri` to tracks. Unknown URIs and failures yield an empty list.
    async fn lookup(&self, uri: &str) -> Vec<Track>;
}

/// Playback capability: just-in-time stream URL resolution
#[async_trait]
pub trait PlaybackProvider: Debug + Send + Sync {
    /// Translates a track URI into a URL the audio pipeline can fetch.
    ///
    /// Returns `None` when the track cannot be played.
    async fn translate_uri(&self, uri: &str) -> Option<String>;
}

/// A library backend as seen by the host
pub trait Backend: Debug + Send + Sync {
    /// URI schemes routed to this backend
    fn uri_schemes(&self) -> &[&'static str];

    fn library(&self) -> Arc<dyn LibraryProvider>;

    fn playback(&self) -> Arc<dyn PlaybackProvider>;
}

/// Returns the scheme of a URI, i.e. everything before the first `:`
pub fn uri_scheme(uri: &str) -> Option<&str> {
    match uri.split_once(':') {
        Some((scheme, _)) if !scheme.is_empty() => Some(scheme),
        _ => None,
    }
}
