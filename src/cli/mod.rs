//! # CLI Module
//!
//! Command implementations behind the `plmerge` binary. Each command loads what
//! it needs from [`crate::config`] and the token cache, builds a
//! [`crate::spotify::SpotifyClient`] and delegates to the merge engine or the
//! HTTP server. Fatal problems end the process through the `error!` macro.
//!
//! ## Commands
//!
//! - [`auth`] - log in with Spotify (PKCE) and cache the token
//! - [`merge`] - merge two or more playlists into a new one
//! - [`inspect`] - show name and track count of playlists
//! - [`serve`] - run the local HTTP server with the merge endpoint
//!
//! ## Usage
//!
//! ```bash
//! plmerge auth
//! plmerge merge https://open.spotify.com/playlist/A https://open.spotify.com/playlist/B
//! plmerge merge --mode union --recommendations always spotify:playlist:A spotify:playlist:B
//! plmerge inspect https://open.spotify.com/playlist/A
//! plmerge serve
//! ```

mod auth;
mod inspect;
mod merge;
mod serve;

pub use auth::auth;
pub use inspect::inspect;
pub use merge::merge;
pub use serve::serve;
