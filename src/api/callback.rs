use axum::{
    Extension,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    management::TokenManager, server::AppState, spotify, success, types::CallbackParams, warning,
};

/// Redirects the browser to the Spotify consent page.
pub async fn login(Extension(state): Extension<AppState>) -> Response {
    match spotify::auth::begin_login(&state.pkce).await {
        Ok(auth_url) => Redirect::temporary(&auth_url).into_response(),
        Err(e) => {
            warning!("Cannot start login: {}", e);
            Html("<h4>Login is not configured.</h4>").into_response()
        }
    }
}

/// Completes the PKCE flow started by [`login`] or `plmerge auth`.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<AppState>,
) -> Html<&'static str> {
    let Some(code) = params.get("code") else {
        if let Some(reason) = params.get("error") {
            warning!("Authorization was denied: {}", reason);
        }
        return Html("<h4>Missing authorization code.</h4>");
    };

    let endpoint = match spotify::auth::TokenEndpoint::from_env() {
        Ok(endpoint) => endpoint,
        Err(e) => {
            warning!("Cannot complete login: {}", e);
            return Html("<h4>Login is not configured.</h4>");
        }
    };

    match spotify::auth::complete_login(&state.pkce, &endpoint, code).await {
        Ok(token) => {
            if let Err(e) = TokenManager::new(token).persist().await {
                warning!("Failed to save token to cache: {}", e);
            }
            success!("Login completed.");
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Login failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
