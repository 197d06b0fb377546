use reqwest::Client;

use crate::{
    Res,
    config::Config,
    types::{AccessToken, AudioFeatures, AudioFeaturesResponse},
};

/// Retrieves audio features for a batch of tracks in one request.
///
/// The ids are joined with commas into a single `ids` query parameter. The
/// returned vector is positionally aligned with `track_ids`; a `None` marks a
/// track the API has no analysis for (local files, podcast episodes).
///
/// An empty id list returns an empty vector without touching the network.
///
/// # Errors
///
/// Returns [`crate::Error::Http`] on network failure, non-success status, or
/// a body without an `audio_features` array.
pub async fn get_audio_features(
    client: &Client,
    config: &Config,
    track_ids: &[&str],
    token: &AccessToken,
) -> Res<Vec<Option<AudioFeatures>>> {
    if track_ids.is_empty() {
        return Ok(Vec::new());
    }

    let response = client
        .get(config.endpoints.audio_features_url())
        .query(&[("ids", track_ids.join(","))])
        .bearer_auth(token.as_str())
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<AudioFeaturesResponse>().await?;

    Ok(json.audio_features)
}
