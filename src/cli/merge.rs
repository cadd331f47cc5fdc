use crate::{
    config, error, info,
    management::TokenManager,
    merge::{self, MergeJob, RecommendationPolicy},
    spotify::SpotifyClient,
    success,
};

pub async fn merge(
    urls: Vec<String>,
    mode: String,
    recommendations: Option<RecommendationPolicy>,
) {
    let mut options = match config::merge_options() {
        Ok(options) => options,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    if let Some(policy) = recommendations {
        options.recommendations = policy;
    }

    let job = match MergeJob::new(&urls, &mode) {
        Ok(job) => job,
        Err(e) => error!("{}", e),
    };

    let access_token = match TokenManager::stored_access_token().await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };

    let client = match SpotifyClient::new(&config::spotify_apiurl(), &access_token) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client: {}", e),
    };

    info!(
        "Merging {} playlists, recommendations: {}",
        job.playlists().len(),
        options.recommendations
    );

    match merge::run(&client, &job, &options).await {
        Ok(outcome) => {
            success!(
                "Created '{}' with {} merged and {} recommended tracks",
                outcome.name,
                outcome.merged_tracks,
                outcome.recommended_tracks
            );
            println!("{}", outcome.playlist_url);
        }
        Err(e) => error!("Merge failed ({}): {}", e.status_code(), e),
    }
}
