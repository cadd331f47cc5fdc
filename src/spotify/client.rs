use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    spotify::{Catalog, CatalogError},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, Playlist, PlaylistTracksResponse,
        RecommendationQuery, RecommendationsResponse, Track,
    },
};

/// Spotify Web API client bound to a single access token.
///
/// The base URL and token are supplied by the caller.
///
/// # Example
///
/// ```
/// let client = SpotifyClient::new("https://api.spotify.com/v1", "BQC...")?;
/// let playlist = client.playlist("37i9dQZF1DXcBWIGoYBM5M").await?;
/// println!("{}", playlist.name);
/// ```
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Creates a client for the API at `api_url`.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base URL, e.g. `https://api.spotify.com/v1`; a trailing
    ///   slash is ignored
    /// * `access_token` - Bearer token sent with every request
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Request`] if the HTTP client cannot be built.
    pub fn new(api_url: &str, access_token: &str) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("plmerge/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{uri}{path}", uri = self.api_url, path = path)
    }
}

/// Turns a non-success response into a [`CatalogError`].
///
/// Spotify wraps failures as `{"error": {"status": .., "message": ..}}`; the
/// inner message is used when present, the raw body otherwise.
async fn check_status(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body);

    if status == StatusCode::UNAUTHORIZED {
        return Err(CatalogError::Unauthorized(message));
    }

    Err(CatalogError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| CatalogError::Parse(e.to_string()))
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<PlaylistTracksResponse, CatalogError> {
        let api_url = self.url(&format!(
            "/playlists/{id}/tracks?limit={limit}&offset={offset}",
            id = playlist_id,
            limit = limit,
            offset = offset
        ));

        let response = self
            .http
            .get(&api_url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        decode(response).await
    }

    async fn playlist(&self, playlist_id: &str) -> Result<Playlist, CatalogError> {
        let api_url = self.url(&format!(
            "/playlists/{id}?fields=id,name,external_urls",
            id = playlist_id
        ));

        let response = self
            .http
            .get(&api_url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        decode(response).await
    }

    async fn current_user(&self) -> Result<CurrentUser, CatalogError> {
        let response = self
            .http
            .get(self.url("/me"))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        decode(response).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, CatalogError> {
        let api_url = self.url(&format!("/users/{user_id}/playlists", user_id = user_id));

        let response = self
            .http
            .post(&api_url)
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await?;

        decode(response).await
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, CatalogError> {
        let api_url = self.url(&format!("/playlists/{id}/tracks", id = playlist_id));
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };

        let response = self
            .http
            .post(&api_url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let res: AddTrackToPlaylistResponse = decode(response).await?;
        Ok(res.snapshot_id)
    }

    async fn recommendations(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Vec<Track>, CatalogError> {
        let seed_tracks = query.seed_tracks.join(",");
        let limit = query.limit.to_string();
        let min_popularity = query.min_popularity.to_string();

        let response = self
            .http
            .get(self.url("/recommendations"))
            .bearer_auth(&self.access_token)
            .query(&[
                ("seed_tracks", seed_tracks.as_str()),
                ("limit", limit.as_str()),
                ("min_popularity", min_popularity.as_str()),
            ])
            .send()
            .await?;

        let res: RecommendationsResponse = decode(response).await?;
        Ok(res.tracks)
    }
}
