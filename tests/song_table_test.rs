use serde_json::json;
use songdata::Error;
use songdata::management::SongTableManager;
use songdata::types::{AudioFeatures, Playlist, PlaylistResponse, SONG_COLUMNS, Track};
use tempfile::TempDir;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artists: &[&str]) -> Track {
    Track {
        id: Some(id.to_string()),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        cover_url: Some(format!("https://i.scdn.co/image/{}", id)),
    }
}

// Helper function to create features where every metric is derived from `base`
fn create_test_features(base: f64) -> AudioFeatures {
    AudioFeatures {
        danceability: base,
        energy: base + 0.01,
        loudness: -base * 10.0,
        speechiness: base + 0.02,
        acousticness: base + 0.03,
        instrumentalness: base + 0.04,
        liveness: base + 0.05,
        valence: base + 0.06,
        tempo: 100.0 + base,
    }
}

fn create_test_playlist(tracks: Vec<Track>) -> Playlist {
    Playlist {
        id: "pl123".to_string(),
        name: Some("Test Playlist".to_string()),
        tracks,
    }
}

fn parse_csv(bytes: &[u8]) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes)
        .records()
        .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn test_build_one_row_per_track() {
    let playlist = create_test_playlist(vec![
        create_test_track("t1", "One", &["A"]),
        create_test_track("t2", "Two", &["B"]),
        create_test_track("t3", "Three", &["C"]),
    ]);

    // Row count never depends on how many features came back
    for features in [
        vec![],
        vec![None, None, None],
        vec![Some(create_test_features(0.1)), None, None],
    ] {
        let table = SongTableManager::build(&playlist, &features);
        assert_eq!(table.count_rows(), 3);
        let ids: Vec<&str> = table.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
    }
}

#[test]
fn test_build_joins_by_position() {
    let playlist = create_test_playlist(vec![
        create_test_track("t1", "One", &["A"]),
        create_test_track("t2", "Two", &["B"]),
        create_test_track("t3", "Three", &["C"]),
    ]);
    let features = vec![None, Some(create_test_features(0.2)), Some(create_test_features(0.3))];

    let table = SongTableManager::build(&playlist, &features);
    let rows = table.rows();

    assert!(!rows[0].has_features());
    assert_eq!(rows[0].tempo, None);

    // A leading null must not shift the later rows
    assert_eq!(rows[1].danceability, Some(0.2));
    assert_eq!(rows[1].tempo, Some(create_test_features(0.2).tempo));
    assert_eq!(rows[2].danceability, Some(0.3));
    assert_eq!(rows[2].loudness, Some(create_test_features(0.3).loudness));

    assert_eq!(table.rows().iter().filter(|r| r.has_features()).count(), 2);
}

#[test]
fn test_build_with_mismatched_lengths() {
    let playlist = create_test_playlist(vec![
        create_test_track("t1", "One", &["A"]),
        create_test_track("t2", "Two", &["B"]),
    ]);

    // Fewer features than tracks: the tail stays blank
    let table = SongTableManager::build(&playlist, &[Some(create_test_features(0.1))]);
    assert_eq!(table.count_rows(), 2);
    assert!(table.rows()[0].has_features());
    assert!(!table.rows()[1].has_features());

    // More features than tracks: the surplus is ignored
    let features = vec![
        Some(create_test_features(0.1)),
        Some(create_test_features(0.2)),
        Some(create_test_features(0.9)),
    ];
    let table = SongTableManager::build(&playlist, &features);
    assert_eq!(table.count_rows(), 2);
    assert_eq!(table.rows()[1].danceability, Some(0.2));
}

#[test]
fn test_build_row_base_fields() {
    let playlist = create_test_playlist(vec![create_test_track(
        "t1",
        "Get Lucky",
        &["Daft Punk", "Pharrell Williams"],
    )]);

    let table = SongTableManager::build(&playlist, &[None]);
    let row = &table.rows()[0];

    assert_eq!(row.id, "t1");
    assert_eq!(row.name, "Get Lucky");
    assert_eq!(row.artist, "Daft Punk, Pharrell Williams");
    assert_eq!(row.cover_url.as_deref(), Some("https://i.scdn.co/image/t1"));
}

#[test]
fn test_write_csv_header_and_blank_features() {
    let playlist = create_test_playlist(vec![
        create_test_track("t1", "One", &["A", "B"]),
        create_test_track("t2", "Two", &["C"]),
    ]);
    let table = SongTableManager::build(&playlist, &[Some(create_test_features(0.5)), None]);

    let mut buffer = Vec::new();
    table.write_to(&mut buffer).unwrap();
    let records = parse_csv(&buffer);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0], SONG_COLUMNS.to_vec());
    assert_eq!(
        records[0].join("|"),
        "ID|Song Name|Artist|Cover Image URL|Danceability|Energy|Loudness|Speechiness|Acousticness|Instrumentalness|Liveness|Valence|Tempo"
    );

    // Artist list with a comma survives as one field
    assert_eq!(records[1][2], "A, B");
    assert_eq!(records[1][4].parse::<f64>().unwrap(), 0.5);
    assert_eq!(records[1][12].parse::<f64>().unwrap(), 100.5);

    assert_eq!(records[2][0], "t2");
    assert_eq!(records[2][3], "https://i.scdn.co/image/t2");
    assert!(records[2][4..].iter().all(|cell| cell.is_empty()));
}

#[test]
fn test_write_csv_empty_playlist_has_header_only() {
    let table = SongTableManager::build(&create_test_playlist(Vec::new()), &[]);

    let mut buffer = Vec::new();
    table.write_to(&mut buffer).unwrap();
    let records = parse_csv(&buffer);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].len(), 13);
}

#[test]
fn test_write_csv_missing_cover_is_blank() {
    let mut track = create_test_track("t1", "One", &["A"]);
    track.cover_url = None;
    let table = SongTableManager::build(&create_test_playlist(vec![track]), &[None]);

    let mut buffer = Vec::new();
    table.write_to(&mut buffer).unwrap();
    let records = parse_csv(&buffer);

    assert_eq!(records[1][3], "");
}

#[tokio::test]
async fn test_persist_overwrites_previous_export() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pl123_songs.csv");
    std::fs::write(&path, "stale content that is much longer than the new table\n".repeat(50))
        .unwrap();

    let playlist = create_test_playlist(vec![create_test_track("t1", "One", &["A"])]);
    let table = SongTableManager::build(&playlist, &[Some(create_test_features(0.1))]);

    let written = table.persist(dir.path()).await.unwrap();
    assert_eq!(written, path);
    assert_eq!(table.file_name(), "pl123_songs.csv");

    let content = std::fs::read(&path).unwrap();
    assert!(!String::from_utf8_lossy(&content).contains("stale"));
    assert_eq!(parse_csv(&content).len(), 2);
}

#[tokio::test]
async fn test_persist_creates_output_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("exports/2026");

    let table = SongTableManager::build(&create_test_playlist(Vec::new()), &[]);
    let written = table.persist(&nested).await.unwrap();

    assert!(written.is_file());
}

#[test]
fn test_playlist_from_response() {
    let response: PlaylistResponse = serde_json::from_value(json!({
        "id": "pl123",
        "name": "Test Playlist",
        "tracks": {
            "items": [
                {
                    "added_at": "2024-01-01T00:00:00Z",
                    "track": {
                        "id": "t1",
                        "name": "One",
                        "artists": [{ "name": "A" }, { "name": "B" }],
                        "album": {
                            "images": [
                                { "url": "https://img/640", "height": 640, "width": 640 },
                                { "url": "https://img/300", "height": 300, "width": 300 }
                            ]
                        }
                    }
                },
                {
                    "track": {
                        "id": "t2",
                        "name": "Two",
                        "artists": [{ "name": "C" }],
                        "album": { "images": [] }
                    }
                }
            ]
        }
    }))
    .unwrap();

    let playlist = Playlist::from_response("pl123", response).unwrap();

    assert_eq!(playlist.name.as_deref(), Some("Test Playlist"));
    assert_eq!(playlist.feature_ids(), vec!["t1", "t2"]);
    assert_eq!(playlist.tracks[0].artists, vec!["A", "B"]);
    // The first image is taken, whatever its size
    assert_eq!(playlist.tracks[0].cover_url.as_deref(), Some("https://img/640"));
    assert_eq!(playlist.tracks[1].cover_url, None);
}

#[test]
fn test_playlist_without_tracks_is_invalid() {
    let response: PlaylistResponse = serde_json::from_value(json!({
        "error": { "status": 404, "message": "Resource not found" }
    }))
    .unwrap();

    assert!(matches!(
        Playlist::from_response("nope", response),
        Err(Error::InvalidPlaylist(id)) if id == "nope"
    ));
}

#[test]
fn test_playlist_tracks_without_items_is_invalid() {
    let response: PlaylistResponse =
        serde_json::from_value(json!({ "tracks": { "total": 0 } })).unwrap();

    assert!(matches!(
        Playlist::from_response("pl", response),
        Err(Error::InvalidPlaylist(_))
    ));
}

#[test]
fn test_playlist_keeps_local_and_removed_tracks() {
    let response: PlaylistResponse = serde_json::from_value(json!({
        "tracks": { "items": [
            { "track": {
                "id": "t1", "name": "One", "artists": [{ "name": "A" }],
                "album": { "images": [{ "url": "https://img/1" }] }
            } },
            { "track": {
                "id": null, "is_local": true, "name": "Home Recording",
                "artists": [{ "name": "Me" }],
                "album": { "name": null, "images": [] }
            } },
            { "track": null },
            { "track": {
                "id": "t4", "name": "Four", "artists": [{ "name": "D" }],
                "album": { "images": [{ "url": "https://img/4" }] }
            } }
        ] }
    }))
    .unwrap();

    let playlist = Playlist::from_response("pl", response).unwrap();

    // One track per item, in item order
    assert_eq!(playlist.tracks.len(), 4);
    assert_eq!(playlist.tracks[1].id, None);
    assert_eq!(playlist.tracks[1].name, "Home Recording");
    assert_eq!(playlist.tracks[1].artists, vec!["Me"]);
    assert_eq!(playlist.tracks[2], Track::default());

    // Only catalog tracks are asked for features
    assert_eq!(playlist.feature_ids(), vec!["t1", "t4"]);
}

#[test]
fn test_playlist_id_comes_from_request() {
    let response: PlaylistResponse = serde_json::from_value(json!({
        "id": "../escaped",
        "tracks": { "items": [] }
    }))
    .unwrap();

    let playlist = Playlist::from_response("requested", response).unwrap();
    assert_eq!(playlist.id, "requested");

    let table = SongTableManager::build(&playlist, &[]);
    assert_eq!(table.file_name(), "requested_songs.csv");
}

#[test]
fn test_align_features_skips_tracks_without_catalog_id() {
    let mut local = create_test_track("x", "Local", &["Me"]);
    local.id = None;
    let mut odd = create_test_track("x", "Odd", &["Me"]);
    odd.id = Some("../../etc".to_string());

    let playlist = create_test_playlist(vec![
        create_test_track("t1", "One", &["A"]),
        local,
        odd,
        create_test_track("t4", "Four", &["D"]),
    ]);
    assert_eq!(playlist.feature_ids(), vec!["t1", "t4"]);

    let aligned = playlist.align_features(vec![
        Some(create_test_features(0.1)),
        Some(create_test_features(0.4)),
    ]);

    assert_eq!(aligned.len(), 4);
    assert_eq!(aligned[0], Some(create_test_features(0.1)));
    assert_eq!(aligned[1], None);
    assert_eq!(aligned[2], None);
    assert_eq!(aligned[3], Some(create_test_features(0.4)));

    // A null entry still consumes its position
    let aligned = playlist.align_features(vec![None, Some(create_test_features(0.4))]);
    assert_eq!(aligned[0], None);
    assert_eq!(aligned[3], Some(create_test_features(0.4)));

    let table = SongTableManager::build(&playlist, &aligned);
    assert_eq!(table.rows()[1].id, "");
    assert_eq!(table.rows()[1].name, "Local");
    assert_eq!(table.rows()[1].artist, "Me");
}
