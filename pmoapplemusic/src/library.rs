//! Catalog resolver: browse and lookup over the `applemusic` namespace
//!
//! Every URI is first classified into a [`CatalogNode`], then served from the
//! remote catalog and the shared [`TrackCache`]:
//!
//! - `applemusic:root` → a single directory ref to the album collection
//! - `applemusic:myalbums` → the first page of the user's library albums
//! - `applemusic:album:<id>` → the album's tracks, which are cached on the way
//! - `applemusic:track:<id>` (lookup only) → the cached track, else one fetch
//!
//! The [`LibraryProvider`] methods never fail: errors are logged against the
//! injected span and the call degrades to an empty result. Callers that need to
//! tell "nothing there" from "something went wrong" use [`AppleMusicLibrary::try_browse`]
//! and [`AppleMusicLibrary::try_lookup`].

use crate::builders::{album_to_ref, build_album, build_track, track_to_ref};
use crate::catalog::{ALBUM_DETAIL_INCLUDE, ALBUM_LIST_INCLUDE, CatalogClient};
use crate::config_ext::AppleMusicSettings;
use crate::error::{AppleMusicError, Result};
use crate::track_cache::TrackCache;
use crate::uri::{self, CatalogNode};
use pmosource::{LibraryProvider, Ref, Track, async_trait};
use std::sync::Arc;
use tracing::{Span, debug, info, warn};

/// Library capability of the Apple Music backend
pub struct AppleMusicLibrary {
    client: Arc<dyn CatalogClient>,
    cache: TrackCache,
    settings: AppleMusicSettings,
    span: Span,
}

impl std::fmt::Debug for AppleMusicLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppleMusicLibrary")
            .field("cache", &self.cache)
            .field("settings", &self.settings)
            .finish()
    }
}

impl AppleMusicLibrary {
    pub fn new(
        client: Arc<dyn CatalogClient>,
        cache: TrackCache,
        settings: AppleMusicSettings,
        span: Span,
    ) -> Self {
        Self {
            client,
            cache,
            settings,
            span,
        }
    }

    pub fn cache(&self) -> &TrackCache {
        &self.cache
    }

    pub fn settings(&self) -> &AppleMusicSettings {
        &self.settings
    }

    /// Lists the children of `uri`, reporting failures
    pub async fn try_browse(&self, uri: &str) -> Result<Vec<Ref>> {
        match CatalogNode::classify(uri)? {
            CatalogNode::Root => Ok(vec![Ref::directory(
                uri::MY_ALBUMS,
                self.settings.albums_label.clone(),
            )]),
            CatalogNode::MyAlbums => self.browse_my_albums().await,
            CatalogNode::Album(id) => self.browse_album(&id).await,
            CatalogNode::Track(_) | CatalogNode::Unrecognized => {
                debug!(parent: &self.span, uri, "Nothing to browse");
                Ok(Vec::new())
            }
        }
    }

    /// Resolves `uri` to tracks, reporting failures
    pub async fn try_lookup(&self, uri: &str) -> Result<Vec<Track>> {
        match CatalogNode::classify(uri)? {
            CatalogNode::Track(id) => self.lookup_track(uri, &id).await.map(|t| vec![t]),
            _ => {
                debug!(parent: &self.span, uri, "Not a track URI");
                Ok(Vec::new())
            }
        }
    }

    async fn browse_my_albums(&self) -> Result<Vec<Ref>> {
        let page = self
            .client
            .list_user_albums(self.settings.page_size, ALBUM_LIST_INCLUDE)
            .await?;

        if page.data.is_empty() {
            return Err(AppleMusicError::RemoteFetchEmpty(uri::MY_ALBUMS.to_string()));
        }

        Ok(page
            .data
            .iter()
            .map(|resource| album_to_ref(&build_album(resource)))
            .collect())
    }

    async fn browse_album(&self, album_id: &str) -> Result<Vec<Ref>> {
        let detail = self.client.get_album(album_id, ALBUM_DETAIL_INCLUDE).await?;
        let resource = detail
            .data
            .first()
            .ok_or_else(|| AppleMusicError::RemoteFetchEmpty(uri::album_uri(album_id)))?;

        let album = build_album(resource);
        let songs = &resource.relationships.tracks.data;
        if let Some(next) = &resource.relationships.tracks.next {
            warn!(
                parent: &self.span,
                album = %album.uri,
                next = %next,
                "Album track list is paginated, only the first page is listed"
            );
        }
        let mut refs = Vec::with_capacity(songs.len());

        for song in songs {
            match build_track(song, Some(&album)) {
                Ok(track) => {
                    refs.push(track_to_ref(&track));
                    self.cache.put(track.uri.clone(), track).await;
                }
                Err(err) => {
                    debug!(parent: &self.span, error = ?err, album = %album.uri, "Skipping track");
                }
            }
        }

        debug!(
            parent: &self.span,
            album = %album.uri,
            "{} of {} tracks resolved",
            refs.len(),
            songs.len()
        );
        Ok(refs)
    }

    async fn lookup_track(&self, uri: &str, id: &str) -> Result<Track> {
        if let Some(track) = self.cache.get(uri).await {
            debug!(parent: &self.span, uri, "Track cache hit");
            return Ok(track);
        }

        let detail = self.client.get_track(id).await?;
        let matching: Vec<_> = detail.data.iter().filter(|r| r.id == id).collect();
        let [resource] = matching.as_slice() else {
            return Err(AppleMusicError::TrackNotFound {
                id: id.to_string(),
                found: matching.len(),
            });
        };

        let track = build_track(resource, None)?;
        self.cache.put(track.uri.clone(), track.clone()).await;
        Ok(track)
    }
}

#[async_trait]
impl LibraryProvider for AppleMusicLibrary {
    fn root_directory(&self) -> Ref {
        Ref::directory(uri::ROOT, self.settings.root_label.clone())
    }

    async fn browse(&self, uri: &str) -> Vec<Ref> {
        info!(parent: &self.span, uri, "Browsing");
        self.try_browse(uri).await.unwrap_or_else(|err| {
            warn!(parent: &self.span, error = ?err, uri, "Browse degraded to an empty listing");
            Vec::new()
        })
    }

    async fn lookup(&self, uri: &str) -> Vec<Track> {
        info!(parent: &self.span, uri, "Looking up");
        self.try_lookup(uri).await.unwrap_or_else(|err| {
            warn!(parent: &self.span, error = ?err, uri, "Lookup degraded to an empty result");
            Vec::new()
        })
    }
}
