//! # Merge Engine
//!
//! Combines two or more Spotify playlists into a new one.
//!
//! ```text
//! merge_playlists
//!     ├── collect_tracks (one per source, concurrent)
//!     ├── resolve (intersection | union)
//!     ├── write_tracks (chunks of 100, sequential)
//!     └── augment (recommendations, optional)
//! ```
//!
//! The engine only sees the [`crate::spotify::Catalog`] trait. Validation
//! happens in [`MergeJob::new`] before any request is sent; failed
//! recommendation requests are recovered inside [`augment`] and never fail
//! the merge.

mod collector;
mod error;
mod model;
mod options;
mod orchestrator;
mod recommend;
pub mod resolver;
mod writer;

pub use collector::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, collect_tracks};
pub use error::MergeError;
pub use model::{MergeMode, PlaylistRef, TrackSet};
pub use options::{MergeOptions, RecommendationOptions, RecommendationPolicy};
pub use orchestrator::{
    MIN_PLAYLISTS, MergeJob, MergeOutcome, destination_description, destination_name,
    merge_playlists, run,
};
pub use recommend::{
    Augmentation, SEED_STRATEGIES, SeedStrategy, augment, request_recommendations, seed_ids,
};
pub use resolver::resolve;
pub use writer::{MAX_TRACKS_PER_WRITE, write_tracks};
