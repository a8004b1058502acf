//! # pmoapplemusic - Apple Music library backend for PMOMusic
//!
//! Exposes a user's Apple Music library to the host as a navigable catalog and
//! resolves tracks to playable stream URLs at playback time.
//!
//! ## Overview
//!
//! - Browse: `applemusic:root` → `applemusic:myalbums` → `applemusic:album:<id>`
//! - Lookup: `applemusic:track:<id>`, served from the track cache when the
//!   album was browsed first
//! - Playback: `applemusic:track:<id>` → a short-lived stream URL, fetched on
//!   every request
//!
//! The host never sees an error from this crate. Failures are logged and the
//! call returns an empty listing or `None`.
//!
//! ## Module layout
//!
//! ```text
//! pmoapplemusic/
//! ├── src/
//! │   ├── lib.rs          # This file
//! │   ├── backend.rs      # AppleMusicBackend (pmosource::Backend)
//! │   ├── library.rs      # Catalog resolver (browse/lookup)
//! │   ├── playback.rs     # Playback resolver
//! │   ├── builders.rs     # Payload → Album/Artist/Track, display names
//! │   ├── track_cache.rs  # Session-lifetime track cache
//! │   ├── uri.rs          # applemusic: URI grammar
//! │   ├── catalog.rs      # CatalogClient seam
//! │   ├── config_ext.rs   # pmoconfig extension
//! │   ├── api/
//! │   │   ├── mod.rs      # HTTP client
//! │   │   ├── library.rs  # Library and playback endpoints
//! │   │   └── schema.rs   # Typed payloads
//! │   └── error.rs
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pmoapplemusic::AppleMusicBackend;
//! use pmosource::{Backend, LibraryProvider, PlaybackProvider};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = pmoconfig::Config::load_config("")?;
//!     let backend = AppleMusicBackend::from_config(&config)?;
//!
//!     let library = backend.library();
//!     for album in library.browse("applemusic:myalbums").await {
//!         println!("{}", album.name);
//!     }
//!
//!     if let Some(url) = backend.playback().translate_uri("applemusic:track:i.abc").await {
//!         println!("stream: {}", url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backend;
pub mod builders;
pub mod catalog;
pub mod config_ext;
pub mod error;
pub mod library;
pub mod playback;
pub mod track_cache;
pub mod uri;

pub use api::AppleMusicApi;
pub use backend::AppleMusicBackend;
pub use catalog::CatalogClient;
pub use config_ext::{AppleMusicConfigExt, AppleMusicSettings};
pub use error::{AppleMusicError, Result};
pub use library::AppleMusicLibrary;
pub use playback::AppleMusicPlayback;
pub use track_cache::TrackCache;
