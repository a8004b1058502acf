//! URI grammar of the `applemusic` namespace
//!
//! | URI                      | Meaning                         |
//! |--------------------------|---------------------------------|
//! | `applemusic:root`        | top-level directory             |
//! | `applemusic:myalbums`    | the user's album collection     |
//! | `applemusic:album:<id>`  | one album's track listing       |
//! | `applemusic:track:<id>`  | one resolvable track            |
//! | `applemusic:artist:<id>` | an artist identity (not browsable) |
//!
//! A URI is `scheme:kind[:id]`. Parsing is permissive: anything non-empty
//! parses, and unknown kinds are simply not matched by the resolver.

use crate::error::{AppleMusicError, Result};

/// URI scheme owned by this backend
pub const SCHEME: &str = "applemusic";

pub const ROOT: &str = "applemusic:root";
pub const MY_ALBUMS: &str = "applemusic:myalbums";

pub const ALBUM_PREFIX: &str = "applemusic:album:";
pub const ARTIST_PREFIX: &str = "applemusic:artist:";
pub const TRACK_PREFIX: &str = "applemusic:track:";

/// A URI split into its kind and optional id
///
/// With three or more segments the kind keeps its trailing `:`
/// (`applemusic:album:`) and the id is the remainder, which may itself contain
/// colons. With fewer segments the kind is the whole URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedUri {
    pub kind: String,
    pub id: Option<String>,
}

/// Splits a URI into kind and id
pub fn parse(uri: &str) -> Result<ParsedUri> {
    if uri.is_empty() {
        return Err(AppleMusicError::MalformedUri(uri.to_string()));
    }

    let mut segments = uri.splitn(3, ':');
    let (Some(scheme), Some(kind), Some(id)) = (segments.next(), segments.next(), segments.next())
    else {
        return Ok(ParsedUri {
            kind: uri.to_string(),
            id: None,
        });
    };

    Ok(ParsedUri {
        kind: format!("{}:{}:", scheme, kind),
        id: Some(id.to_string()),
    })
}

/// Inverse of [`parse`]
pub fn format(kind: &str, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("{}{}", kind, id),
        None => kind.to_string(),
    }
}

pub fn album_uri(id: &str) -> String {
    format(ALBUM_PREFIX, Some(id))
}

pub fn artist_uri(id: &str) -> String {
    format(ARTIST_PREFIX, Some(id))
}

pub fn track_uri(id: &str) -> String {
    format(TRACK_PREFIX, Some(id))
}

/// The segment after the last `:`, or the whole string when there is none
pub fn trailing_id(uri: &str) -> &str {
    uri.rsplit(':').next().unwrap_or(uri)
}

/// What a URI addresses, as far as the resolver is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNode {
    Root,
    MyAlbums,
    Album(String),
    Track(String),
    Unrecognized,
}

impl CatalogNode {
    pub fn classify(uri: &str) -> Result<Self> {
        let parsed = parse(uri)?;
        let node = match (parsed.kind.as_str(), parsed.id) {
            (ROOT, None) => Self::Root,
            (MY_ALBUMS, None) => Self::MyAlbums,
            (ALBUM_PREFIX, Some(id)) if !id.is_empty() => Self::Album(id),
            (TRACK_PREFIX, Some(id)) if !id.is_empty() => Self::Track(id),
            _ => Self::Unrecognized,
        };
        Ok(node)
    }
}
