use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    error,
    merge::MergeOptions,
    server::{AppState, start_api_server},
    spotify, success,
    types::PkceToken,
    warning,
};

pub async fn auth() {
    let pkce: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));

    // the callback route persists the token once Spotify redirects back
    let state = AppState::new(Arc::clone(&pkce), MergeOptions::default());
    tokio::spawn(async move {
        if let Err(e) = start_api_server(state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    match spotify::auth::auth(pkce).await {
        Ok(_) => success!("Authentication successful!"),
        Err(e) => error!("{}", e),
    }
}
