use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use url::Url;

use crate::{
    config,
    spotify::CatalogError,
    types::{PkceToken, Token},
    utils, warning,
};

/// How long the login flow waits for the browser callback.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: u64,
}

/// Builds the Spotify authorization URL for the PKCE flow.
///
/// # Errors
///
/// Returns an error if the configured authorization URL is not a valid URL.
pub fn authorize_url(client_id: &str, code_challenge: &str) -> Result<String, String> {
    let redirect_uri = config::spotify_redirect_uri();
    let scope = config::spotify_scope();

    let url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| e.to_string())?;

    Ok(url.to_string())
}

/// Starts a PKCE login and stores the fresh verifier in `shared_state`.
///
/// Returns the URL the user has to open.
pub async fn begin_login(
    shared_state: &Arc<Mutex<Option<PkceToken>>>,
) -> Result<String, String> {
    let client_id = config::spotify_client_id()?;
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    authorize_url(&client_id, &code_challenge)
}

/// Runs the complete OAuth 2.0 PKCE login from the command line.
///
/// The caller must already serve the callback route with the same
/// `shared_state`. The authorization URL is opened in the default browser and
/// the function then waits for the callback to deposit a token.
///
/// # Errors
///
/// Fails when the client id is missing or no token arrives before the timeout.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<Token, String> {
    let auth_url = begin_login(&shared_state).await?;

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    wait_for_token(shared_state)
        .await
        .ok_or_else(|| "Authentication failed or timed out.".to_string())
}

/// Polls `shared_state` until the callback handler stored a token.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Where and as whom authorization codes are exchanged for tokens.
#[derive(Debug, Clone)]
pub struct TokenEndpoint {
    pub url: String,
    pub client_id: String,
    pub redirect_uri: String,
}

impl TokenEndpoint {
    /// Reads the token URL, client id and redirect URI from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            url: config::spotify_apitoken_url(),
            client_id: config::spotify_client_id()?,
            redirect_uri: config::spotify_redirect_uri(),
        })
    }
}

/// Finishes a login started by [`begin_login`].
///
/// The verifier is copied out of `shared_state` before the exchange, so the
/// state stays unlocked while Spotify is contacted. On success the token is
/// stored back into `shared_state`, where [`auth`] picks it up.
///
/// # Arguments
///
/// * `shared_state` - PKCE state written by [`begin_login`]
/// * `endpoint` - Token endpoint to exchange the code at
/// * `code` - Authorization code from the callback query
///
/// # Errors
///
/// Fails when no login is pending or the exchange is rejected.
pub async fn complete_login(
    shared_state: &Arc<Mutex<Option<PkceToken>>>,
    endpoint: &TokenEndpoint,
    code: &str,
) -> Result<Token, String> {
    let verifier = {
        let lock = shared_state.lock().await;
        lock.as_ref()
            .map(|pkce| pkce.code_verifier.clone())
            .ok_or_else(|| "Missing PKCE code verifier.".to_string())?
    };

    let token = exchange_code_pkce(endpoint, code, &verifier)
        .await
        .map_err(|e| e.to_string())?;

    if let Some(pkce) = shared_state.lock().await.as_mut() {
        pkce.token = Some(token.clone());
    }
    Ok(token)
}

/// Exchanges an authorization code for a token using the PKCE verifier.
///
/// # Errors
///
/// Returns [`CatalogError::Status`] when Spotify rejects the exchange,
/// [`CatalogError::Request`] on network failures and [`CatalogError::Parse`]
/// for an unreadable token response.
pub async fn exchange_code_pkce(
    endpoint: &TokenEndpoint,
    code: &str,
    verifier: &str,
) -> Result<Token, CatalogError> {
    let client = Client::new();
    let res = client
        .post(&endpoint.url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", endpoint.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", endpoint.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.as_u16(),
            message: res.text().await.unwrap_or_default(),
        });
    }

    let json: TokenResponse = res
        .json()
        .await
        .map_err(|e| CatalogError::Parse(e.to_string()))?;

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token.unwrap_or_default(),
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
