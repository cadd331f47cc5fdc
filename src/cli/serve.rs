use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config, error, info,
    server::{AppState, start_api_server},
};

pub async fn serve() {
    let options = match config::merge_options() {
        Ok(options) => options,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    let state = AppState::new(Arc::new(Mutex::new(None)), options);
    info!(
        "Listening on http://{} (recommendations: {})",
        config::server_addr(),
        state.options.recommendations
    );

    if let Err(e) = start_api_server(state).await {
        error!("{}", e);
    }
}
