//! Conversion of API resources into host models and refs

use crate::api::schema::{AlbumResource, ArtistResource, Relationship, SongResource};
use crate::error::{AppleMusicError, Result};
use crate::uri;
use pmosource::{Album, Artist, Ref, Track};

/// Placeholder shown for albums without a name
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Builds an artist from a relationship entry
pub fn build_artist(resource: &ArtistResource) -> Artist {
    Artist {
        uri: uri::artist_uri(&resource.id),
        name: resource
            .attributes
            .as_ref()
            .and_then(|a| a.name.clone())
            .unwrap_or_default(),
    }
}

fn build_artists(relationship: &Relationship<ArtistResource>) -> Vec<Artist> {
    relationship.data.iter().map(build_artist).collect()
}

/// Builds an album with its artists, in relationship order
///
/// A missing name stays empty here; [`album_display_name`] supplies the placeholder.
pub fn build_album(resource: &AlbumResource) -> Album {
    let attributes = resource.attributes.as_ref();

    Album {
        uri: uri::album_uri(&resource.id),
        name: attributes.and_then(|a| a.name.clone()).unwrap_or_default(),
        artists: build_artists(&resource.relationships.artists),
        track_count: attributes.and_then(|a| a.track_count).unwrap_or(0),
        date: attributes.and_then(|a| a.release_date.clone()),
    }
}

/// Builds a track, attaching `album` as display back-reference
///
/// Fails with [`AppleMusicError::IncompleteTrackData`] when the name or the
/// duration is missing.
pub fn build_track(resource: &SongResource, album: Option<&Album>) -> Result<Track> {
    let incomplete = |missing| AppleMusicError::IncompleteTrackData {
        id: resource.id.clone(),
        missing,
    };

    let attributes = resource.attributes.as_ref().ok_or_else(|| incomplete("attributes"))?;
    let name = attributes.name.clone().ok_or_else(|| incomplete("name"))?;
    let length_ms = attributes
        .duration_in_millis
        .ok_or_else(|| incomplete("durationInMillis"))?;

    Ok(Track {
        uri: uri::track_uri(&resource.id),
        name,
        artists: build_artists(&resource.relationships.artists),
        album: album.cloned(),
        length_ms,
        track_no: attributes.track_number,
        disc_no: attributes.disc_number,
    })
}

fn join_artist_names(artists: &[Artist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `"Name - Artist1, Artist2"`, or just the name when there are no artists
pub fn album_display_name(album: &Album) -> String {
    let name = if album.name.is_empty() {
        UNKNOWN_ALBUM
    } else {
        album.name.as_str()
    };

    if album.artists.is_empty() {
        name.to_string()
    } else {
        format!("{} - {}", name, join_artist_names(&album.artists))
    }
}

/// Track name, suffixed with the track-level credits when known
///
/// Album artists are deliberately not used as a fallback.
pub fn track_display_name(track: &Track) -> String {
    if track.artists.is_empty() {
        track.name.clone()
    } else {
        format!("{} - {}", track.name, join_artist_names(&track.artists))
    }
}

pub fn album_to_ref(album: &Album) -> Ref {
    Ref::album(album.uri.clone(), album_display_name(album))
}

pub fn track_to_ref(track: &Track) -> Ref {
    Ref::track(track.uri.clone(), track_display_name(track))
}
