use std::path::PathBuf;

use gmusic_rs::model::CatalogKind;
use gmusic_rs::snapshot::SnapshotClient;
use gmusic_rs::{ArtistInfoOptions, CatalogError, CatalogSession};

const EMAIL: &str = "listener@example.com";
const PASSWORD: &str = "correct horse";

type Session = CatalogSession<SnapshotClient, SnapshotClient>;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/library.json")
}

fn session() -> Session {
    let web = SnapshotClient::open(&fixture()).unwrap();
    let mobile = SnapshotClient::open(&fixture()).unwrap();
    CatalogSession::new(web, mobile)
}

fn signed_in() -> Session {
    let mut session = session();
    assert!(session.authenticate(EMAIL, PASSWORD).unwrap());
    session
}

#[test]
fn test_authenticate_resolves_account_state() {
    let session = signed_in();
    assert!(session.is_authenticated());
    assert!(session.is_all_access());
    // The phone wins over the iOS device and loses its "0x" prefix
    assert_eq!(session.device_id(), Some("3a9bc2d4e5f60718"));
}

#[test]
fn test_wrong_password_is_refused() {
    let mut session = session();
    assert!(!session.authenticate(EMAIL, "battery staple").unwrap());
    assert!(!session.is_authenticated());
    assert_eq!(session.device_id(), None);
}

#[test]
fn test_repeated_authenticate_is_idempotent() {
    let mut session = signed_in();
    assert!(session.authenticate(EMAIL, PASSWORD).unwrap());
    assert!(session.is_authenticated());
}

#[test]
fn test_load_data_builds_all_indices() {
    let mut session = signed_in();
    session.load_data().unwrap();
    assert!(session.is_library_loaded());

    let artists: Vec<String> = session.load_artists().unwrap().keys().cloned().collect();
    assert_eq!(artists, vec!["Miles Davis", "Nina Simone", "Can"]);

    let albums = session.load_albums().unwrap();
    assert_eq!(albums["Kind of Blue"].len(), 2);
    assert_eq!(
        albums["Kind of Blue"][1].thumb.as_deref(),
        Some("https://art.example/kind-of-blue.jpg")
    );

    let genres = session.load_genres().unwrap();
    assert_eq!(genres["Jazz"].len(), 3);
    assert_eq!(genres["Krautrock"].len(), 1);

    let thumbs = session.artist_thumbs().unwrap();
    assert_eq!(thumbs["Miles Davis"].as_deref(), Some("https://art.example/miles.jpg"));
    assert_eq!(thumbs["Nina Simone"], None);
}

#[test]
fn test_track_projection_keeps_song_fields() {
    let mut session = signed_in();
    let entry = session.artist_tracks("Miles Davis").unwrap()[0].clone();

    assert_eq!(entry.id, "c1a1");
    assert_eq!(entry.thumb.as_deref(), Some("https://art.example/miles.jpg"));
    assert_eq!(entry.track.title, "So What");
    assert_eq!(entry.track.duration_millis, 562_000);
    assert_eq!(entry.track.track_type, 1);
    assert_eq!(entry.track.store_id.as_deref(), Some("Tsowhat"));

    let json = serde_json::to_value(&entry.track).unwrap();
    assert_eq!(json["durationMillis"], 562_000);
    assert_eq!(json["trackType"], 1);
    assert!(json.get("albumArtRef").is_some());
}

#[test]
fn test_tracks_for_type_and_song_lookup() {
    let mut session = signed_in();
    let by_tag = session.get_tracks_for_type("Albums", "Tago Mago").unwrap().to_vec();
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].id, "c3a1");
    assert!(session.get_tracks_for_type("stations", "Tago Mago").unwrap().is_empty());

    assert_eq!(session.get_song("c2a1").unwrap().title, "Sinnerman");
    assert!(matches!(
        session.get_song("nope"),
        Err(CatalogError::SongNotFound(_))
    ));
    assert_eq!(CatalogKind::Albums.label(), "album");
}

#[test]
fn test_playlists_and_stations() {
    let mut session = signed_in();

    let playlists = session.get_all_playlists().unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0].name, "Late night");

    let entries = session.get_all_user_playlist_contents("pl-late-night").unwrap();
    let ids: Vec<&str> = entries.iter().map(|e| e.track_id.as_str()).collect();
    assert_eq!(ids, vec!["c1a1", "c2a1"]);

    assert_eq!(session.get_shared_playlist_contents("share-abc").unwrap().len(), 1);

    let stations = session.get_all_stations().unwrap();
    assert_eq!(stations[0].id, "st-jazz");
    assert_eq!(session.get_station_tracks("st-jazz", 10).unwrap()[0].id, "c2a1");

    let created = session.create_station("Cool", "COOL_JAZZ").unwrap();
    assert!(!created.is_empty());
    // The station list was cached before the station was created
    assert_eq!(session.get_all_stations().unwrap().len(), 1);
}

#[test]
fn test_catalog_info_queries() {
    let mut session = signed_in();

    assert_eq!(session.get_genres().unwrap().len(), 2);

    let results = session.search_all_access("tago", 50).unwrap();
    assert_eq!(results.song_hits.len(), 1);
    assert_eq!(results.album_hits.len(), 1);

    let artist = session
        .get_artist_info(
            "art-can",
            ArtistInfoOptions {
                include_albums: false,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(artist.name, "Can");
    assert!(artist.albums.is_empty());
    assert_eq!(artist.related_artists.len(), 1);

    let album = session.get_album_info("alb-tago", true).unwrap();
    assert_eq!(album.year, Some(1971));
}

#[test]
fn test_expired_session_is_recovered() {
    let mut session = signed_in();
    session.mobile().logout();

    assert_eq!(session.load_songs().unwrap().len(), 4);
    assert!(session.mobile().is_logged_in());
    assert!(session.is_authenticated());
}

#[test]
fn test_queries_before_authenticate_return_empty() {
    let mut session = session();
    assert!(session.load_songs().unwrap().is_empty());
    assert!(session.get_all_playlists().unwrap().is_empty());
    assert_eq!(session.create_station("x", "JAZZ").unwrap(), "");
    assert!(matches!(
        session.get_stream_url("c1a1"),
        Err(CatalogError::NoDevice(_))
    ));

    // Nothing was cached, so signing in later still loads everything
    assert!(session.authenticate(EMAIL, PASSWORD).unwrap());
    assert_eq!(session.load_songs().unwrap().len(), 4);
    assert_eq!(session.get_all_playlists().unwrap().len(), 1);
}

#[test]
fn test_stream_url() {
    let mut session = signed_in();
    assert_eq!(
        session.get_stream_url("c1a1").unwrap(),
        "https://stream.example/play/c1a1?device=3a9bc2d4e5f60718"
    );

    let err = session.get_stream_url("missing-id").unwrap_err();
    assert!(matches!(err, CatalogError::StreamUrl { .. }));
    assert!(err.to_string().contains("missing-id"));
}
