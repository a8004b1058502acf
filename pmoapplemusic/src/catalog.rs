//! Remote catalog seam
//!
//! The resolvers only ever talk to the catalog through [`CatalogClient`], so
//! the HTTP transport can be swapped for a canned implementation in tests.

use crate::api::schema::{AlbumDetail, AlbumsPage, PlaybackPayload, TrackDetail};
use crate::error::Result;
use async_trait::async_trait;

/// Relationships the user album listing asks to be expanded inline
pub const ALBUM_LIST_INCLUDE: &[&str] = &["artists"];

/// Relationships an album fetch asks to be expanded inline
pub const ALBUM_DETAIL_INCLUDE: &[&str] = &["artists", "tracks"];

/// The four calls the bridge makes against the remote catalog
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// First page of the user's library albums
    async fn list_user_albums(&self, page_size: u32, include: &[&str]) -> Result<AlbumsPage>;

    /// One library album by id
    async fn get_album(&self, id: &str, include: &[&str]) -> Result<AlbumDetail>;

    /// One library song by id
    async fn get_track(&self, id: &str) -> Result<TrackDetail>;

    /// Playback assets of a song; the URLs inside are short-lived
    async fn get_playback_assets(&self, id: &str) -> Result<PlaybackPayload>;
}
