//! Error type shared by every fallible operation.
//!
//! Only [`Error::Auth`] and [`Error::InvalidPlaylist`] come out of the
//! network stages of an export; per-track problems (a cover image that cannot
//! be fetched, a track without audio features) are not errors at all and
//! surface as skipped downloads or blank cells. The remaining variants wrap
//! configuration and local I/O failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable is missing or a value does not parse.
    #[error("configuration error: {0}")]
    Config(String),

    /// The token endpoint rejected the credentials or answered without a token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The playlist id is not a Spotify id, or the playlist response carried
    /// no `tracks` collection: unknown id, private playlist or revoked access.
    #[error("invalid playlist id or access denied: {0}")]
    InvalidPlaylist(String),

    /// Transport failure, or a non-success status where one is not expected.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Creating a directory or writing the table failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serializing a song row failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A successful response body was not the JSON the endpoint documents.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
