//! Library endpoints (the user's albums and songs) and web playback

use super::AppleMusicApi;
use super::schema::{AlbumDetail, AlbumsPage, PlaybackPayload, TrackDetail};
use crate::catalog::CatalogClient;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

impl AppleMusicApi {
    /// Fetches the first page of the user's library albums
    pub async fn list_user_albums(&self, page_size: u32, include: &[&str]) -> Result<AlbumsPage> {
        debug!(parent: &self.span, "Fetching {} library albums", page_size);
        let limit = page_size.to_string();
        let include = include.join(",");

        let mut params = vec![("limit", limit.as_str())];
        if !include.is_empty() {
            params.push(("include", include.as_str()));
        }

        self.get(&["v1", "me", "library", "albums"], &params).await
    }

    /// Fetches one library album
    pub async fn get_album(&self, album_id: &str, include: &[&str]) -> Result<AlbumDetail> {
        debug!(parent: &self.span, "Fetching library album {}", album_id);
        let include = include.join(",");

        let mut params = Vec::new();
        if !include.is_empty() {
            params.push(("include", include.as_str()));
        }

        self.get(&["v1", "me", "library", "albums", album_id], &params)
            .await
    }

    /// Fetches one library song
    pub async fn get_track(&self, track_id: &str) -> Result<TrackDetail> {
        debug!(parent: &self.span, "Fetching library song {}", track_id);
        self.get(&["v1", "me", "library", "songs", track_id], &[])
            .await
    }

    /// Requests playback assets for a song
    pub async fn get_playback_assets(&self, track_id: &str) -> Result<PlaybackPayload> {
        debug!(parent: &self.span, "Fetching playback assets for {}", track_id);
        let body = json!({ "salableAdamId": track_id });
        self.post_playback(&body).await
    }
}

#[async_trait]
impl CatalogClient for AppleMusicApi {
    async fn list_user_albums(&self, page_size: u32, include: &[&str]) -> Result<AlbumsPage> {
        AppleMusicApi::list_user_albums(self, page_size, include).await
    }

    async fn get_album(&self, id: &str, include: &[&str]) -> Result<AlbumDetail> {
        AppleMusicApi::get_album(self, id, include).await
    }

    async fn get_track(&self, id: &str) -> Result<TrackDetail> {
        AppleMusicApi::get_track(self, id).await
    }

    async fn get_playback_assets(&self, id: &str) -> Result<PlaybackPayload> {
        AppleMusicApi::get_playback_assets(self, id).await
    }
}
