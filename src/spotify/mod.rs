//! # Spotify Integration Module
//!
//! This module is the boundary between plmerge and the Spotify Web API. The merge
//! engine never talks HTTP itself; it is written against the [`Catalog`] trait,
//! and [`SpotifyClient`] is the production implementation of that trait.
//!
//! ## Layout
//!
//! ```text
//! merge engine
//!      ↓
//! Catalog trait (this module)
//!      ↓
//! SpotifyClient (reqwest, JSON)
//!      ↓
//! Spotify Web API
//! ```
//!
//! - [`auth`] - OAuth 2.0 authorization code flow with PKCE
//! - [`client`] - the reqwest-backed [`SpotifyClient`]
//!
//! ## API Coverage
//!
//! - `GET /me` - current user, owner of the destination playlist
//! - `GET /playlists/{id}` - playlist display metadata
//! - `GET /playlists/{id}/tracks` - paginated playlist items
//! - `POST /users/{user_id}/playlists` - create the destination playlist
//! - `POST /playlists/{id}/tracks` - append up to 100 tracks
//! - `GET /recommendations` - seeded track recommendations
//!
//! ## Errors
//!
//! Every call returns [`CatalogError`]. A `401 Unauthorized` answer is reported
//! as [`CatalogError::Unauthorized`] so that callers can ask the user to log in
//! again; every other non-success status keeps its code and body.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{
    CreatePlaylistRequest, CreatePlaylistResponse, CurrentUser, Playlist, PlaylistTracksResponse,
    RecommendationQuery, Track,
};

pub mod auth;
pub mod client;

pub use client::SpotifyClient;

/// Errors raised by a [`Catalog`] implementation.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The access token is missing, invalid or expired.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Spotify answered with a non-success status.
    #[error("Spotify API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Network or protocol failure.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Authenticated access to the music catalog.
///
/// The methods map one to one onto Spotify Web API calls. Implementations must
/// not retry on their own.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetches one page of playlist items starting at `offset`.
    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<PlaylistTracksResponse, CatalogError>;

    async fn playlist(&self, playlist_id: &str) -> Result<Playlist, CatalogError>;

    async fn current_user(&self) -> Result<CurrentUser, CatalogError>;

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, CatalogError>;

    /// Appends `uris` to the end of a playlist. At most 100 URIs per call.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<String, CatalogError>;

    async fn recommendations(&self, query: &RecommendationQuery)
    -> Result<Vec<Track>, CatalogError>;
}
