use reqwest::Client;
use serde_json::Value;

use crate::{Error, Res, config::Config, info, types::AccessToken, utils};

/// Exchanges the client credentials for a bearer access token.
///
/// Sends the `client_credentials` grant as a form-encoded `POST` to the
/// configured token endpoint. The token is used for the rest of the run and
/// is neither cached nor refreshed.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `config` - Run configuration holding the credentials and token endpoint
/// * `verbose` - Print the response status and a redacted copy of the body
///
/// # Errors
///
/// - [`Error::Auth`] if the endpoint answers with a non-success status or the
///   body carries no `access_token`
/// - [`Error::Http`] if the request itself fails
pub async fn acquire_token(client: &Client, config: &Config, verbose: bool) -> Res<AccessToken> {
    let credentials = &config.credentials;
    let res = client
        .post(&config.endpoints.token_url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;
    let json: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

    if verbose {
        info!("Token endpoint status: {}", status);
        info!("Token endpoint response: {}", utils::redact_token_response(&json));
    }

    if !status.is_success() {
        let reason = json["error_description"]
            .as_str()
            .or_else(|| json["error"].as_str())
            .unwrap_or("no error description");
        return Err(Error::Auth(format!(
            "token endpoint returned {}: {}",
            status, reason
        )));
    }

    json["access_token"]
        .as_str()
        .filter(|token| !token.is_empty())
        .map(AccessToken::new)
        .ok_or_else(|| Error::Auth("token response did not contain an access_token".to_string()))
}
