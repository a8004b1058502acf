//! Host-facing Apple Music backend

use crate::api::AppleMusicApi;
use crate::catalog::CatalogClient;
use crate::config_ext::{AppleMusicConfigExt, AppleMusicSettings};
use crate::error::Result;
use crate::library::AppleMusicLibrary;
use crate::playback::AppleMusicPlayback;
use crate::track_cache::TrackCache;
use crate::uri;
use pmoconfig::Config;
use pmosource::{Backend, LibraryProvider, PlaybackProvider};
use std::sync::Arc;
use tracing::{Span, info, info_span};

/// The `applemusic` backend: one catalog client, one track cache, two capabilities
///
/// Both capabilities share the client and log under the same `applemusic`
/// span. The track cache lives as long as the backend.
///
/// # Example
///
/// ```rust,no_run
/// use pmoapplemusic::AppleMusicBackend;
/// use pmosource::{Backend, BackendRegistry, LibraryProvider};
/// use std::sync::Arc;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = AppleMusicBackend::new("developer-token", "user-token")?;
/// let registry = BackendRegistry::new();
/// registry.register(Arc::new(backend)).await?;
///
/// let library = registry.backend_for("applemusic:root").await?.library();
/// for entry in library.browse("applemusic:myalbums").await {
///     println!("{}", entry.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AppleMusicBackend {
    library: Arc<AppleMusicLibrary>,
    playback: Arc<AppleMusicPlayback>,
}

impl AppleMusicBackend {
    /// Creates the backend with default settings
    ///
    /// Both tokens are passed unmodified to the API client.
    pub fn new(developer_token: impl Into<String>, user_token: impl Into<String>) -> Result<Self> {
        Self::with_settings(developer_token, user_token, AppleMusicSettings::default())
    }

    pub fn with_settings(
        developer_token: impl Into<String>,
        user_token: impl Into<String>,
        settings: AppleMusicSettings,
    ) -> Result<Self> {
        let api = AppleMusicApi::new(developer_token, user_token)?;
        Ok(Self::with_api(api, settings))
    }

    /// Creates the backend over an HTTP client, logging its requests under the backend span
    pub fn with_api(api: AppleMusicApi, settings: AppleMusicSettings) -> Self {
        let span = info_span!("applemusic");
        let api = api.with_span(span.clone());
        Self::assemble(Arc::new(api), settings, span)
    }

    /// Creates the backend from the `accounts.applemusic` configuration section
    pub fn from_config(config: &Config) -> Result<Self> {
        let (developer_token, user_token) = config.get_applemusic_credentials()?;
        Self::with_settings(developer_token, user_token, config.get_applemusic_settings())
    }

    /// Creates the backend over any catalog client
    pub fn with_client(client: Arc<dyn CatalogClient>, settings: AppleMusicSettings) -> Self {
        Self::assemble(client, settings, info_span!("applemusic"))
    }

    fn assemble(client: Arc<dyn CatalogClient>, settings: AppleMusicSettings, span: Span) -> Self {
        info!(parent: &span, page_size = settings.page_size, "Apple Music backend ready");

        let library = AppleMusicLibrary::new(client.clone(), TrackCache::new(), settings, span.clone());
        let playback = AppleMusicPlayback::new(client, span);

        Self {
            library: Arc::new(library),
            playback: Arc::new(playback),
        }
    }

    /// Concrete library capability, with its strict `try_*` methods
    pub fn catalog(&self) -> &Arc<AppleMusicLibrary> {
        &self.library
    }

    /// Concrete playback capability
    pub fn player(&self) -> &Arc<AppleMusicPlayback> {
        &self.playback
    }
}

impl Backend for AppleMusicBackend {
    fn uri_schemes(&self) -> &[&'static str] {
        &[uri::SCHEME]
    }

    fn library(&self) -> Arc<dyn LibraryProvider> {
        self.library.clone()
    }

    fn playback(&self) -> Arc<dyn PlaybackProvider> {
        self.playback.clone()
    }
}
