//! Typed payloads of the Apple Music API
//!
//! Responses follow the JSON:API layout: a `data` array of resources, each with
//! an `id`, `attributes` and `relationships`. Relationship keys and `data`
//! arrays are frequently absent or `null`; both map to empty defaults here so
//! the builders never have to probe the raw JSON.

use serde::{Deserialize, Deserializer};

/// Flexible deserializer for ids that may be strings or integers
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(Error::custom("ID must be a string or number")),
    }
}

/// Treats an explicit `null` like an absent key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Top-level `{ "data": [...], "next": "..." }` envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct DataResponse<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Default for DataResponse<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            next: None,
        }
    }
}

/// A single API resource
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>, R: Default + Deserialize<'de>"))]
pub struct Resource<A, R = NoRelationships> {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default = "Option::default")]
    pub attributes: Option<A>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationships: R,
}

/// `{ "data": [...], "next": "..." }` under a relationship key
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Relationship<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Default for Relationship<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            next: None,
        }
    }
}

/// Relationships of resources that are never expanded
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoRelationships {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistAttributes {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumAttributes {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub track_count: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongAttributes {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration_in_millis: Option<u64>,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(default)]
    pub disc_number: Option<u32>,
    #[serde(default)]
    pub artist_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumRelationships {
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Relationship<ArtistResource>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracks: Relationship<SongResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongRelationships {
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Relationship<ArtistResource>,
}

pub type ArtistResource = Resource<ArtistAttributes>;
pub type AlbumResource = Resource<AlbumAttributes, AlbumRelationships>;
pub type SongResource = Resource<SongAttributes, SongRelationships>;

/// Page of the user's library albums
pub type AlbumsPage = DataResponse<AlbumResource>;
/// Response of a single album fetch
pub type AlbumDetail = DataResponse<AlbumResource>;
/// Response of a single song fetch
pub type TrackDetail = DataResponse<SongResource>;

/// Response of the web playback endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaybackPayload {
    #[serde(rename = "songList", default, deserialize_with = "null_as_default")]
    pub song_list: Vec<SongEntry>,
}

/// One playable song in a [`PlaybackPayload`]
#[derive(Debug, Clone, Deserialize)]
pub struct SongEntry {
    #[serde(rename = "songId", default)]
    pub song_id: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assets: Vec<Asset>,
}

/// A downloadable rendition of a song
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(default)]
    pub flavor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_album_with_artists() {
        let album: AlbumResource = serde_json::from_value(json!({
            "id": "l.1",
            "type": "library-albums",
            "attributes": {"name": "Blue", "trackCount": 10},
            "relationships": {
                "artists": {"data": [{"id": "r.1", "attributes": {"name": "Joni"}}]}
            }
        }))
        .unwrap();

        assert_eq!(album.id, "l.1");
        assert_eq!(album.kind.as_deref(), Some("library-albums"));
        let attributes = album.attributes.unwrap();
        assert_eq!(attributes.name.as_deref(), Some("Blue"));
        assert_eq!(attributes.track_count, Some(10));
        assert_eq!(album.relationships.artists.data.len(), 1);
        assert!(album.relationships.tracks.data.is_empty());
    }

    #[test]
    fn test_null_and_absent_relationships_are_empty() {
        let absent: AlbumResource = serde_json::from_value(json!({"id": "1"})).unwrap();
        assert!(absent.attributes.is_none());
        assert!(absent.relationships.artists.data.is_empty());

        let null_rel: AlbumResource =
            serde_json::from_value(json!({"id": "1", "relationships": null})).unwrap();
        assert!(null_rel.relationships.artists.data.is_empty());

        let null_key: AlbumResource = serde_json::from_value(json!({
            "id": "1",
            "relationships": {"artists": null, "tracks": {"data": null}}
        }))
        .unwrap();
        assert!(null_key.relationships.artists.data.is_empty());
        assert!(null_key.relationships.tracks.data.is_empty());
    }

    #[test]
    fn test_numeric_id() {
        let song: SongResource = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(song.id, "42");
    }

    #[test]
    fn test_data_response_null_data() {
        let page: AlbumsPage = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(page.data.is_empty());
        let page: AlbumsPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_playback_payload() {
        let payload: PlaybackPayload = serde_json::from_value(json!({
            "songList": [{
                "songId": "42",
                "assets": [{"URL": "https://aod.example/a.m4p", "flavor": "28:ctrp256"}]
            }]
        }))
        .unwrap();
        assert_eq!(payload.song_list.len(), 1);
        assert_eq!(payload.song_list[0].assets[0].url, "https://aod.example/a.m4p");

        let empty: PlaybackPayload = serde_json::from_value(json!({})).unwrap();
        assert!(empty.song_list.is_empty());
    }
}
