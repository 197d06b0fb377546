//! # Spotify Integration Module
//!
//! Thin async wrappers around the three Spotify Web API endpoints the export
//! needs. Each function takes a shared [`reqwest::Client`] and the run's
//! [`Config`](crate::config::Config), performs exactly one request, and maps
//! the response into the typed entities of [`crate::types`].
//!
//! ```text
//! Pipeline
//!    ↓
//! Spotify Integration Layer
//!     ├── auth      POST {token_url}                      client credentials → token
//!     ├── playlist  GET  {api_url}/playlists/{id}         playlist + tracks
//!     └── features  GET  {api_url}/audio-features?ids=…   audio features, batched
//!    ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! There is no retry, pagination or token refresh: a run fetches one token,
//! one page of playlist items and one batch of audio features.

pub mod auth;
pub mod features;
pub mod playlist;

use reqwest::Client;

use crate::{Res, config::Config};

/// Builds the HTTP client shared by every request of a run.
pub fn http_client(config: &Config) -> Res<Client> {
    let client = Client::builder()
        .timeout(config.request_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
