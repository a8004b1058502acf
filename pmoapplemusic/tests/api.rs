mod common;

use common::LogCapture;
use mockito::{Matcher, Server};
use pmoapplemusic::{AppleMusicApi, AppleMusicBackend, AppleMusicError, AppleMusicSettings, CatalogClient};
use pmosource::{Backend, LibraryProvider, PlaybackProvider};
use serde_json::json;
use std::sync::Arc;

fn api(server: &Server) -> AppleMusicApi {
    AppleMusicApi::new("dev", "user")
        .unwrap()
        .with_base_urls(server.url(), format!("{}/play", server.url()))
}

#[tokio::test]
async fn test_list_user_albums_sends_tokens_and_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/me/library/albums")
        .match_header("authorization", "Bearer dev")
        .match_header("music-user-token", "user")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("include".into(), "artists".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": [{
                    "id": "l.1",
                    "type": "library-albums",
                    "attributes": {"name": "Blue", "trackCount": 10},
                    "relationships": {"artists": {"data": [{"id": "r.1", "attributes": {"name": "Joni Mitchell"}}]}}
                }],
                "next": "/v1/me/library/albums?offset=10"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let page = api(&server).list_user_albums(10, &["artists"]).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, "l.1");
    assert_eq!(page.next.as_deref(), Some("/v1/me/library/albums?offset=10"));
}

#[tokio::test]
async fn test_get_album_joins_includes() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/me/library/albums/l.7")
        .match_query(Matcher::UrlEncoded("include".into(), "artists,tracks".into()))
        .with_status(200)
        .with_body(json!({"data": [{"id": "l.7"}]}).to_string())
        .create_async()
        .await;

    let detail = api(&server)
        .get_album("l.7", &["artists", "tracks"])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(detail.data[0].id, "l.7");
}

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/me/library/songs/missing")
        .with_status(404)
        .with_body(json!({"errors": [{"status": "404", "title": "Not Found", "detail": "No such song"}]}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/v1/me/library/songs/secret")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("GET", "/v1/me/library/songs/busy")
        .with_status(429)
        .create_async()
        .await;

    let api = api(&server);

    match api.get_track("missing").await {
        Err(AppleMusicError::NotFound(message)) => assert_eq!(message, "No such song"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(api.get_track("secret").await.unwrap_err().is_auth_error());
    assert!(api.get_track("busy").await.unwrap_err().is_rate_limit());
}

#[tokio::test]
async fn test_errors_array_with_success_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/me/library/songs/odd")
        .with_status(200)
        .with_body(json!({"errors": [{"title": "Upstream failure"}]}).to_string())
        .create_async()
        .await;

    let err = api(&server).get_track("odd").await.unwrap_err();
    assert!(matches!(err, AppleMusicError::ApiError { code: 200, ref message } if message == "Upstream failure"));
}

#[tokio::test]
async fn test_playback_posts_song_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/play")
        .match_header("authorization", "Bearer dev")
        .match_header("music-user-token", "user")
        .match_body(Matcher::Json(json!({"salableAdamId": "1440833098"})))
        .with_status(200)
        .with_body(
            json!({
                "songList": [{
                    "songId": "1440833098",
                    "assets": [{"URL": "https://aod.example/x.m4p", "flavor": "28:ctrp256"}]
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let payload = api(&server).get_playback_assets("1440833098").await.unwrap();

    mock.assert_async().await;
    assert_eq!(payload.song_list[0].assets[0].url, "https://aod.example/x.m4p");
}

#[tokio::test]
async fn test_playback_failure_type_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/play")
        .with_status(200)
        .with_body(json!({"failureType": "3077", "customerMessage": "Not subscribed"}).to_string())
        .create_async()
        .await;

    let err = api(&server).get_playback_assets("1").await.unwrap_err();
    assert!(err.to_string().contains("Not subscribed (failure 3077)"));
}

#[tokio::test]
async fn test_backend_over_http() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/me/library/albums/l.7")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({"data": [{
                "id": "l.7",
                "attributes": {"name": "Blue"},
                "relationships": {
                    "artists": {"data": [{"id": "r.1", "attributes": {"name": "Joni Mitchell"}}]},
                    "tracks": {"data": [
                        {"id": "i.1", "attributes": {"name": "All I Want", "durationInMillis": 214000}},
                        {"id": "i.2", "attributes": {"name": "My Old Man"}}
                    ]}
                }
            }]})
            .to_string(),
        )
        .create_async()
        .await;
    let song_mock = server
        .mock("GET", "/v1/me/library/songs/i.1")
        .expect(0)
        .create_async()
        .await;
    server
        .mock("POST", "/play")
        .with_status(200)
        .with_body(json!({"songList": [{"assets": [{"URL": "https://aod.example/i.1"}]}]}).to_string())
        .create_async()
        .await;

    let client: Arc<dyn CatalogClient> = Arc::new(api(&server));
    let backend = AppleMusicBackend::with_client(client, AppleMusicSettings::default());

    let refs = backend.library().browse("applemusic:album:l.7").await;
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].uri, "applemusic:track:i.1");

    let tracks = backend.library().lookup("applemusic:track:i.1").await;
    assert_eq!(tracks[0].album.as_ref().map(|a| a.name.as_str()), Some("Blue"));
    song_mock.assert_async().await;

    assert_eq!(
        backend.playback().translate_uri("applemusic:track:i.1").await.as_deref(),
        Some("https://aod.example/i.1")
    );
}

#[tokio::test]
async fn test_requests_log_under_backend_span() {
    let (logs, _guard) = LogCapture::install();
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/me/library/songs/i.3")
        .with_status(200)
        .with_body(json!({"data": [{"id": "i.3", "attributes": {"name": "Three", "durationInMillis": 1}}]}).to_string())
        .create_async()
        .await;

    let backend = AppleMusicBackend::with_api(api(&server), AppleMusicSettings::default());
    assert_eq!(backend.library().lookup("applemusic:track:i.3").await.len(), 1);

    let contents = logs.contents();
    let request_lines: Vec<_> = contents.lines().filter(|l| l.contains("GET ")).collect();
    assert!(!request_lines.is_empty());
    assert!(request_lines.iter().all(|l| l.contains("applemusic:")));
    assert!(!contents.contains("applemusic.api"));
}
