use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::{Error, utils};

/// Bearer token handed out by the accounts service for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

// Wire format of `GET /playlists/{id}`. Local files and removed tracks come
// back with a `null` id or a `null` track, so nearly everything is optional.

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistResponse {
    pub name: Option<String>,
    pub tracks: Option<PlaylistTracks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracks {
    pub items: Option<Vec<PlaylistItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    pub album: Option<AlbumObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumObject {
    #[serde(default)]
    pub images: Vec<ImageObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageObject {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    /// `None` for local files and removed tracks.
    pub id: Option<String>,
    pub name: String,
    /// Artist names in the order the API lists them.
    pub artists: Vec<String>,
    /// First entry of the album's image list, if the list is not empty.
    pub cover_url: Option<String>,
}

impl Track {
    /// The id, if it is one the Web API can be asked about.
    pub fn catalog_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| utils::is_spotify_id(id))
    }
}

impl From<TrackObject> for Track {
    fn from(track: TrackObject) -> Self {
        Track {
            id: track.id.filter(|id| !id.is_empty()),
            name: track.name.unwrap_or_default(),
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            cover_url: track
                .album
                .and_then(|album| album.images.into_iter().next())
                .map(|image| image.url),
        }
    }
}

/// A validated playlist: the requested playlist id plus one track per
/// playlist item, in playlist order.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub id: String,
    pub name: Option<String>,
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Validates the wire payload of the playlist `requested_id`.
    ///
    /// A payload without a `tracks.items` collection is an
    /// [`Error::InvalidPlaylist`]. Every item yields a track, including items
    /// whose `track` is `null`, so the row count always equals the item count.
    /// The playlist is identified by `requested_id`; the payload's own `id`
    /// is ignored.
    pub fn from_response(requested_id: &str, response: PlaylistResponse) -> Result<Self, Error> {
        let tracks = response
            .tracks
            .and_then(|tracks| tracks.items)
            .ok_or_else(|| Error::InvalidPlaylist(requested_id.to_string()))?
            .into_iter()
            .map(|item| item.track.map(Track::from).unwrap_or_default())
            .collect();

        Ok(Playlist {
            id: requested_id.to_string(),
            name: response.name,
            tracks,
        })
    }

    /// Ids to request audio features for: tracks with a catalog id, in
    /// playlist order.
    pub fn feature_ids(&self) -> Vec<&str> {
        self.tracks.iter().filter_map(Track::catalog_id).collect()
    }

    /// Spreads features fetched for [`Playlist::feature_ids`] back onto every
    /// track. Tracks without a catalog id get `None` and do not consume an
    /// entry, so later tracks stay aligned.
    pub fn align_features(&self, fetched: Vec<Option<AudioFeatures>>) -> Vec<Option<AudioFeatures>> {
        let mut fetched = fetched.into_iter();
        self.tracks
            .iter()
            .map(|track| match track.catalog_id() {
                Some(_) => fetched.next().flatten(),
                None => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    /// Positionally aligned with the requested ids; `null` where the API has
    /// no analysis for the track.
    pub audio_features: Vec<Option<AudioFeatures>>,
}

/// Column names of the exported table, in order.
pub const SONG_COLUMNS: [&str; 13] = [
    "ID",
    "Song Name",
    "Artist",
    "Cover Image URL",
    "Danceability",
    "Energy",
    "Loudness",
    "Speechiness",
    "Acousticness",
    "Instrumentalness",
    "Liveness",
    "Valence",
    "Tempo",
];

/// One line of the exported table. Field order matches [`SONG_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Song Name")]
    pub name: String,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Cover Image URL")]
    pub cover_url: Option<String>,
    #[serde(rename = "Danceability")]
    pub danceability: Option<f64>,
    #[serde(rename = "Energy")]
    pub energy: Option<f64>,
    #[serde(rename = "Loudness")]
    pub loudness: Option<f64>,
    #[serde(rename = "Speechiness")]
    pub speechiness: Option<f64>,
    #[serde(rename = "Acousticness")]
    pub acousticness: Option<f64>,
    #[serde(rename = "Instrumentalness")]
    pub instrumentalness: Option<f64>,
    #[serde(rename = "Liveness")]
    pub liveness: Option<f64>,
    #[serde(rename = "Valence")]
    pub valence: Option<f64>,
    #[serde(rename = "Tempo")]
    pub tempo: Option<f64>,
}

impl SongRow {
    pub fn has_features(&self) -> bool {
        self.danceability.is_some()
    }
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub name: String,
    pub artist: String,
    pub danceability: String,
    pub energy: String,
    pub valence: String,
    pub tempo: String,
}
