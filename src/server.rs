use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{Res, api, config, merge::MergeOptions, types::PkceToken};

/// State shared by all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub pkce: Arc<Mutex<Option<PkceToken>>>,
    pub api_url: String,
    pub options: MergeOptions,
}

impl AppState {
    pub fn new(pkce: Arc<Mutex<Option<PkceToken>>>, options: MergeOptions) -> Self {
        Self {
            pkce,
            api_url: config::spotify_apiurl(),
            options,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/api/merge", post(api::merge))
        .layer(Extension(state))
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
