use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, error,
    management::TokenManager,
    merge::{self, MergeError, PlaylistRef},
    spotify::{Catalog, SpotifyClient},
    types::PlaylistTableRow,
    warning,
};

async fn summarize(
    client: &SpotifyClient,
    playlist: &PlaylistRef,
    page_size: u32,
) -> Result<PlaylistTableRow, MergeError> {
    let info = client.playlist(playlist.id()).await?;
    let tracks = merge::collect_tracks(client, playlist, page_size).await?;

    Ok(PlaylistTableRow {
        name: info.name,
        tracks: tracks.len(),
        id: info.id,
    })
}

/// Prints name and track count of each playlist.
pub async fn inspect(urls: Vec<String>) {
    let options = match config::merge_options() {
        Ok(options) => options,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    let access_token = match TokenManager::stored_access_token().await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };

    let client = match SpotifyClient::new(&config::spotify_apiurl(), &access_token) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let mut rows: Vec<PlaylistTableRow> = Vec::new();
    for url in &urls {
        let playlist = match PlaylistRef::parse(url) {
            Ok(playlist) => playlist,
            Err(e) => {
                pb.suspend(|| warning!("{}", e));
                continue;
            }
        };

        pb.set_message(format!("Fetching tracks of {}...", playlist));
        match summarize(&client, &playlist, options.page_size).await {
            Ok(row) => rows.push(row),
            Err(e) => pb.suspend(|| warning!("Failed to inspect {}: {}", playlist, e)),
        }
    }
    pb.finish_and_clear();

    if rows.is_empty() {
        warning!("Nothing to show.");
        return;
    }

    let table = Table::new(rows);
    println!("{}", table);
}
