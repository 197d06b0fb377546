use serde_json::Value;

use crate::types::{SongRow, SongTableRow};

pub const DEFAULT_PLAYLIST_ID: &str = "1C8RuvGfRsX1fmxaehox9K";

const PLAYLIST_URI_PREFIX: &str = "spotify:playlist:";
const PLAYLIST_URL_SEGMENT: &str = "open.spotify.com/playlist/";

/// Extracts a playlist id from a bare id, a `spotify:playlist:` URI or an
/// `open.spotify.com/playlist/` URL. Returns `None` if the result is not a
/// plausible Spotify id (ASCII alphanumeric, non-empty).
pub fn parse_playlist_id(input: &str) -> Option<String> {
    let input = input.trim();

    let candidate = if let Some(rest) = input.strip_prefix(PLAYLIST_URI_PREFIX) {
        rest
    } else if let Some(pos) = input.find(PLAYLIST_URL_SEGMENT) {
        let rest = &input[pos + PLAYLIST_URL_SEGMENT.len()..];
        rest.split(['?', '/', '#']).next().unwrap_or_default()
    } else {
        input
    };

    is_spotify_id(candidate).then(|| candidate.to_string())
}

/// Spotify ids are base62: non-empty and ASCII alphanumeric. Anything else
/// must never reach a URL path or a file name.
pub fn is_spotify_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn join_artists(artists: &[String]) -> String {
    artists.join(", ")
}

pub fn csv_file_name(playlist_id: &str) -> String {
    format!("{}_songs.csv", playlist_id)
}

/// Cover image file name for a track, `None` if the id is not a Spotify id.
pub fn image_file_name(track_id: &str) -> Option<String> {
    is_spotify_id(track_id).then(|| format!("{}.jpg", track_id))
}

/// Returns a copy of a token endpoint response with every secret-bearing
/// field replaced by `<redacted>`, for diagnostic output.
pub fn redact_token_response(body: &Value) -> Value {
    const SECRET_KEYS: [&str; 3] = ["access_token", "refresh_token", "id_token"];

    let mut redacted = body.clone();
    if let Some(object) = redacted.as_object_mut() {
        for key in SECRET_KEYS {
            if let Some(value) = object.get_mut(key) {
                *value = Value::String("<redacted>".to_string());
            }
        }
    }
    redacted
}

fn format_feature(value: Option<f64>) -> String {
    value.map(|v| format!("{:.3}", v)).unwrap_or_else(|| "-".to_string())
}

pub fn song_table_rows(rows: &[SongRow]) -> Vec<SongTableRow> {
    rows.iter()
        .map(|row| SongTableRow {
            name: row.name.clone(),
            artist: row.artist.clone(),
            danceability: format_feature(row.danceability),
            energy: format_feature(row.energy),
            valence: format_feature(row.valence),
            tempo: format_feature(row.tempo),
        })
        .collect()
}
