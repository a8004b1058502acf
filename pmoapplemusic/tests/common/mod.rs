//! Shared fixtures for the integration tests
#![allow(dead_code)]

use pmoapplemusic::api::schema::{AlbumDetail, AlbumsPage, PlaybackPayload, TrackDetail};
use pmoapplemusic::{AppleMusicError, CatalogClient, Result};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Canned catalog that counts every call
#[derive(Default)]
pub struct MockCatalog {
    albums: Option<Value>,
    album_details: HashMap<String, Value>,
    tracks: HashMap<String, Value>,
    playback: HashMap<String, Value>,

    pub list_calls: AtomicUsize,
    pub album_calls: AtomicUsize,
    pub track_calls: AtomicUsize,
    pub playback_calls: AtomicUsize,

    /// `(page_size, include)` of every album listing request
    pub list_requests: Mutex<Vec<(u32, Vec<String>)>>,
    /// `include` of every album request
    pub album_includes: Mutex<Vec<Vec<String>>>,
    /// Ids passed to the playback endpoint
    pub playback_ids: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_albums(mut self, page: Value) -> Self {
        self.albums = Some(page);
        self
    }

    pub fn with_album(mut self, id: &str, detail: Value) -> Self {
        self.album_details.insert(id.to_string(), detail);
        self
    }

    pub fn with_track(mut self, id: &str, detail: Value) -> Self {
        self.tracks.insert(id.to_string(), detail);
        self
    }

    pub fn with_playback(mut self, id: &str, payload: Value) -> Self {
        self.playback.insert(id.to_string(), payload);
        self
    }

    pub fn total_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
            + self.album_calls.load(Ordering::SeqCst)
            + self.track_calls.load(Ordering::SeqCst)
            + self.playback_calls.load(Ordering::SeqCst)
    }
}

fn canned<T: DeserializeOwned>(value: Option<&Value>, what: &str) -> Result<T> {
    match value {
        Some(value) => Ok(serde_json::from_value(value.clone())?),
        None => Err(AppleMusicError::NotFound(what.to_string())),
    }
}

fn owned(include: &[&str]) -> Vec<String> {
    include.iter().map(|s| s.to_string()).collect()
}

#[pmosource::async_trait]
impl CatalogClient for MockCatalog {
    async fn list_user_albums(&self, page_size: u32, include: &[&str]) -> Result<AlbumsPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list_requests
            .lock()
            .unwrap()
            .push((page_size, owned(include)));
        canned(self.albums.as_ref(), "albums")
    }

    async fn get_album(&self, id: &str, include: &[&str]) -> Result<AlbumDetail> {
        self.album_calls.fetch_add(1, Ordering::SeqCst);
        self.album_includes.lock().unwrap().push(owned(include));
        canned(self.album_details.get(id), id)
    }

    async fn get_track(&self, id: &str) -> Result<TrackDetail> {
        self.track_calls.fetch_add(1, Ordering::SeqCst);
        canned(self.tracks.get(id), id)
    }

    async fn get_playback_assets(&self, id: &str) -> Result<PlaybackPayload> {
        self.playback_calls.fetch_add(1, Ordering::SeqCst);
        self.playback_ids.lock().unwrap().push(id.to_string());
        canned(self.playback.get(id), id)
    }
}

// ============ Payload fixtures ============

pub fn artist(id: &str, name: &str) -> Value {
    json!({"id": id, "type": "library-artists", "attributes": {"name": name}})
}

pub fn song(id: &str, name: &str, duration_ms: u64) -> Value {
    json!({
        "id": id,
        "type": "library-songs",
        "attributes": {"name": name, "durationInMillis": duration_ms}
    })
}

/// A song payload without `durationInMillis`
pub fn song_without_duration(id: &str, name: &str) -> Value {
    json!({"id": id, "type": "library-songs", "attributes": {"name": name}})
}

pub fn album(id: &str, name: &str, artists: Vec<Value>, songs: Vec<Value>) -> Value {
    json!({
        "id": id,
        "type": "library-albums",
        "attributes": {"name": name, "trackCount": songs.len()},
        "relationships": {
            "artists": {"data": artists},
            "tracks": {"data": songs}
        }
    })
}

pub fn data(items: Vec<Value>) -> Value {
    json!({ "data": items })
}

pub fn playback(urls_per_song: &[&[&str]]) -> Value {
    let songs: Vec<Value> = urls_per_song
        .iter()
        .enumerate()
        .map(|(i, urls)| {
            let assets: Vec<Value> = urls
                .iter()
                .map(|url| json!({"URL": url, "flavor": "28:ctrp256"}))
                .collect();
            json!({"songId": i.to_string(), "assets": assets})
        })
        .collect();
    json!({ "songList": songs })
}

// ============ Log capture ============

/// Collects formatted log output of the current thread
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: self.buffer.clone(),
        }
    }
}

impl LogCapture {
    /// Installs a capturing subscriber until the guard is dropped
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}
