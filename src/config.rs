//! Configuration management for songdata.
//!
//! Configuration comes from environment variables, optionally seeded from
//! `.env` files. Sources, in order of priority:
//! 1. Environment variables of the running process
//! 2. `.env.local` in the working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/songdata/.env`)
//! 4. Built-in defaults for the endpoint URLs and the request timeout
//!
//! The result is one immutable [`Config`] that is built at startup and handed
//! by reference to every component.

use std::{env, fmt, path::PathBuf, time::Duration};

use crate::{Error, Res};

pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";
const REDIRECT_URI_VAR: &str = "SPOTIFY_REDIRECT_URI";
const TOKEN_URL_VAR: &str = "SPOTIFY_API_TOKEN_URL";
const API_URL_VAR: &str = "SPOTIFY_API_URL";
const TIMEOUT_VAR: &str = "SONGDATA_HTTP_TIMEOUT_SECS";

/// Loads `.env` files into the process environment.
///
/// Looks for `.env.local` in the working directory and for `.env` under the
/// platform-specific local data directory:
/// - Linux: `~/.local/share/songdata/.env`
/// - macOS: `~/Library/Application Support/songdata/.env`
/// - Windows: `%LOCALAPPDATA%/songdata/.env`
///
/// Variables already present in the environment are never overwritten, and
/// a missing file is not an error.
///
/// # Returns
///
/// The paths of the files that were found and loaded.
pub fn load_env() -> Vec<PathBuf> {
    let mut data_env = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    data_env.push("songdata/.env");

    [PathBuf::from(".env.local"), data_env]
        .into_iter()
        .filter(|path| path.is_file())
        .filter_map(|path| dotenv::from_path(&path).ok().map(|_| path))
        .collect()
}

/// Client credentials for the Spotify accounts service.
///
/// The redirect URI is carried along with the id and secret because it is
/// part of the registered application, even though the client-credentials
/// grant does not send it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Token endpoint, e.g. `https://accounts.spotify.com/api/token`.
    pub token_url: String,
    /// Web API base, e.g. `https://api.spotify.com/v1`. No trailing slash.
    pub api_url: String,
}

impl Endpoints {
    pub fn playlist_url(&self, playlist_id: &str) -> String {
        format!("{uri}/playlists/{id}", uri = self.api_url, id = playlist_id)
    }

    pub fn audio_features_url(&self) -> String {
        format!("{uri}/audio-features", uri = self.api_url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(credentials: Credentials, endpoints: Endpoints) -> Self {
        Self {
            credentials,
            endpoints,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] first to pick up `.env` files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if one of `SPOTIFY_CLIENT_ID`,
    /// `SPOTIFY_CLIENT_SECRET` or `SPOTIFY_REDIRECT_URI` is unset or empty, or
    /// if `SONGDATA_HTTP_TIMEOUT_SECS` is not a positive integer.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{} must be set", key)))
        };

        let credentials = Credentials {
            client_id: required(CLIENT_ID_VAR)?,
            client_secret: required(CLIENT_SECRET_VAR)?,
            redirect_uri: required(REDIRECT_URI_VAR)?,
        };

        let endpoints = Endpoints {
            token_url: lookup(TOKEN_URL_VAR).unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: lookup(API_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        };

        let request_timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::Config(format!(
                        "{} must be a positive number of seconds, got '{}'",
                        TIMEOUT_VAR, raw
                    )));
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            credentials,
            endpoints,
            request_timeout,
        })
    }
}
