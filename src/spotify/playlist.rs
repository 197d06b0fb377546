use reqwest::Client;

use crate::{
    Error, Res,
    config::Config,
    types::{AccessToken, Playlist, PlaylistResponse},
};

/// Retrieves a playlist and its tracks from the Spotify Web API.
///
/// Performs a single authenticated `GET {api_url}/playlists/{id}` and
/// validates the payload into a [`Playlist`]. Only the first page of track
/// items that the endpoint embeds is used, and every item becomes a track,
/// local files and removed tracks included.
///
/// # Errors
///
/// - [`Error::InvalidPlaylist`] if the response has no `tracks` collection.
///   This covers unknown ids, private playlists and revoked access, which
///   the API reports with an error body instead of a playlist.
/// - [`Error::Http`] / [`Error::Json`] for transport or decoding failures of
///   a successful response
///
/// # Example
///
/// ```
/// let playlist = get_playlist(&client, &config, "1C8RuvGfRsX1fmxaehox9K", &token).await?;
/// println!("{} tracks", playlist.tracks.len());
/// ```
pub async fn get_playlist(
    client: &Client,
    config: &Config,
    playlist_id: &str,
    token: &AccessToken,
) -> Res<Playlist> {
    let response = client
        .get(config.endpoints.playlist_url(playlist_id))
        .bearer_auth(token.as_str())
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    let payload = match serde_json::from_str::<PlaylistResponse>(&body) {
        Ok(payload) => payload,
        Err(_) if !status.is_success() => {
            return Err(Error::InvalidPlaylist(format!("{} (HTTP {})", playlist_id, status)));
        }
        Err(e) => return Err(e.into()),
    };

    Playlist::from_response(playlist_id, payload).map_err(|e| match e {
        Error::InvalidPlaylist(_) => {
            Error::InvalidPlaylist(format!("{} (HTTP {})", playlist_id, status))
        }
        other => other,
    })
}
