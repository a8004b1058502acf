//! Walks an Apple Music library from the root down to a stream URL
//!
//! Credentials are read from the `accounts.applemusic` section of the
//! configuration, or from the environment:
//!
//! ```text
//! PMOMUSIC_CONFIG__ACCOUNTS__APPLEMUSIC__DEVELOPER_TOKEN=... \
//! PMOMUSIC_CONFIG__ACCOUNTS__APPLEMUSIC__USER_TOKEN=... \
//! cargo run -p pmoapplemusic --example browse_library
//! ```

use pmoapplemusic::AppleMusicBackend;
use pmoconfig::Config;
use pmosource::{Backend, LibraryProvider, PlaybackProvider};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_config("")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.get_log_min_level().unwrap_or_default().to_lowercase()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let backend = AppleMusicBackend::from_config(&config)?;
    let library = backend.library();

    let root = library.root_directory();
    println!("{} ({})", root.name, root.uri);

    for entry in library.browse(&root.uri).await {
        println!("  {} ({})", entry.name, entry.uri);
    }

    let albums = library.browse("applemusic:myalbums").await;
    println!("\n{} album(s)", albums.len());
    for album in &albums {
        println!("  {}", album.name);
    }

    let Some(first_album) = albums.first() else {
        println!("Library is empty");
        return Ok(());
    };

    println!("\n--- {} ---", first_album.name);
    let tracks = library.browse(&first_album.uri).await;
    for track in &tracks {
        println!("  {} ({})", track.name, track.uri);
    }

    let Some(first_track) = tracks.first() else {
        return Ok(());
    };

    for track in library.lookup(&first_track.uri).await {
        let seconds = track.length_ms / 1000;
        println!("\n{}: {}:{:02}", track.name, seconds / 60, seconds % 60);
    }

    match backend.playback().translate_uri(&first_track.uri).await {
        Some(url) => println!("Stream URL: {}", url),
        None => println!("No stream URL available"),
    }

    Ok(())
}
