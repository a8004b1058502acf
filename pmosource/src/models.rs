//! Media models shared between library backends and the host
//!
//! These are plain values: every backend builds them fresh from its own
//! payloads and hands them to the host by value.

use serde::{Deserialize, Serialize};

/// An artist identity. Leaf entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artist {
    pub uri: String,
    pub name: String,
}

/// An album with its credited artists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub uri: String,
    /// May be empty; displays fall back to a placeholder
    pub name: String,
    /// Credited artists in source order, owned by the album
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub track_count: u32,
    /// Release date as reported by the catalog
    #[serde(default)]
    pub date: Option<String>,
}

/// A playable track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    /// Track-level credits, empty when the catalog did not provide any
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// Display back-reference to the containing album
    #[serde(default)]
    pub album: Option<Album>,
    pub length_ms: u64,
    #[serde(default)]
    pub track_no: Option<u32>,
    #[serde(default)]
    pub disc_no: Option<u32>,
}

/// Kind of object a [`Ref`] points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefType {
    Directory,
    Album,
    Artist,
    Track,
}

/// A lightweight navigable pointer: URI plus display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ref {
    pub uri: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ref_type: RefType,
}

impl Ref {
    fn new(ref_type: RefType, uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            ref_type,
        }
    }

    pub fn directory(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(RefType::Directory, uri, name)
    }

    pub fn album(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(RefType::Album, uri, name)
    }

    pub fn artist(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(RefType::Artist, uri, name)
    }

    pub fn track(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(RefType::Track, uri, name)
    }

    /// Whether the host can browse into this ref
    pub fn is_browsable(&self) -> bool {
        matches!(self.ref_type, RefType::Directory | RefType::Album)
    }
}
