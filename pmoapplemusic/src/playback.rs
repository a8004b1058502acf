//! Playback resolver: track URI to a short-lived stream URL

use crate::catalog::CatalogClient;
use crate::error::{AppleMusicError, Result};
use crate::uri;
use pmosource::{PlaybackProvider, async_trait};
use std::sync::Arc;
use tracing::{Span, debug, info, warn};

/// Playback capability of the Apple Music backend
///
/// Stream URLs expire quickly, so every call goes to the remote catalog and
/// nothing is cached.
pub struct AppleMusicPlayback {
    client: Arc<dyn CatalogClient>,
    span: Span,
}

impl std::fmt::Debug for AppleMusicPlayback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppleMusicPlayback").finish()
    }
}

impl AppleMusicPlayback {
    pub fn new(client: Arc<dyn CatalogClient>, span: Span) -> Self {
        Self { client, span }
    }

    /// Fetches the stream URL of the track addressed by `uri`
    ///
    /// The id is whatever follows the last `:`. The payload must hold exactly
    /// one song entry with at least one asset; the first asset wins.
    pub async fn resolve_stream_url(&self, uri: &str) -> Result<String> {
        if uri.is_empty() {
            return Err(AppleMusicError::MalformedUri(uri.to_string()));
        }

        let id = uri::trailing_id(uri);
        let payload = self.client.get_playback_assets(id).await?;

        let [song] = payload.song_list.as_slice() else {
            return Err(AppleMusicError::PlaybackDataUnavailable {
                id: id.to_string(),
                reason: format!("{} song entries", payload.song_list.len()),
            });
        };

        let asset = song
            .assets
            .first()
            .ok_or_else(|| AppleMusicError::PlaybackDataUnavailable {
                id: id.to_string(),
                reason: "no assets".to_string(),
            })?;

        debug!(parent: &self.span, id, flavor = ?asset.flavor, "Stream asset selected");
        Ok(asset.url.clone())
    }
}

#[async_trait]
impl PlaybackProvider for AppleMusicPlayback {
    async fn translate_uri(&self, uri: &str) -> Option<String> {
        info!(parent: &self.span, uri, "Resolving stream URL");
        match self.resolve_stream_url(uri).await {
            Ok(url) => Some(url),
            Err(err) => {
                warn!(parent: &self.span, error = ?err, uri, "No stream URL");
                None
            }
        }
    }
}
