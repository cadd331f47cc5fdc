//! # API Module
//!
//! HTTP endpoints of the local plmerge server.
//!
//! ## Endpoints
//!
//! - `GET /health` - [`health`], status and version
//! - `GET /login` - [`login`], redirects to the Spotify consent page
//! - `GET /callback` - [`callback`], completes the PKCE login and caches the token
//! - `POST /api/merge` - [`merge`], merges playlists and returns the new playlist URL
//!
//! ## Merge endpoint
//!
//! ```text
//! POST /api/merge
//! Authorization: Bearer <token>        (optional, falls back to the cached login)
//! {"urls": ["https://open.spotify.com/playlist/..", ".."], "mergeMode": "union"}
//!
//! 200 {"playlistUrl": "https://open.spotify.com/playlist/.."}
//! 400 | 401 | 500 {"statusCode": 400, "message": ".."}
//! ```
//!
//! Validation happens before the token is looked up or any Spotify request is
//! sent.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use plmerge::server::{AppState, router};
//!
//! let app = router(AppState::new(pkce_state, MergeOptions::default()));
//! ```

mod callback;
mod health;
mod merge;

pub use callback::{callback, login};
pub use health::health;
pub use merge::{ApiError, bearer_token, merge};
