use std::fmt;

use crate::{
    info,
    merge::{MergeError, RecommendationOptions, TrackSet, write_tracks},
    spotify::Catalog,
    types::{RecommendationQuery, Track},
    utils, warning,
};

/// Which seeds one recommendation attempt sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStrategy {
    /// Every available seed.
    All,
    /// Only the first seed.
    FirstOnly,
}

/// Attempts are made in this order until one succeeds.
pub const SEED_STRATEGIES: [SeedStrategy; 2] = [SeedStrategy::All, SeedStrategy::FirstOnly];

impl SeedStrategy {
    pub fn select<'a>(&self, seeds: &'a [String]) -> &'a [String] {
        match self {
            SeedStrategy::All => seeds,
            SeedStrategy::FirstOnly => &seeds[..seeds.len().min(1)],
        }
    }
}

impl fmt::Display for SeedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedStrategy::All => f.write_str("all seeds"),
            SeedStrategy::FirstOnly => f.write_str("first seed"),
        }
    }
}

/// Result of the recommendation step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Augmentation {
    /// Number of recommendation requests sent.
    pub attempts: usize,
    /// Recommended URIs that were written to the playlist.
    pub recommended: Vec<String>,
    pub write_calls: usize,
}

/// Spotify track ids of the first `max` tracks of `pool`.
pub fn seed_ids(pool: &TrackSet, max: usize) -> Vec<String> {
    pool.iter()
        .take(max)
        .map(|uri| utils::track_id_from_uri(uri).to_string())
        .collect()
}

/// Requests recommendations, degrading the seed set on failure.
///
/// Returns the number of requests sent and the tracks of the first successful
/// attempt, or `None` when every strategy failed.
pub async fn request_recommendations(
    catalog: &dyn Catalog,
    seeds: &[String],
    options: &RecommendationOptions,
) -> (usize, Option<Vec<Track>>) {
    let mut attempts = 0;

    for strategy in SEED_STRATEGIES {
        let query = RecommendationQuery {
            seed_tracks: strategy.select(seeds).to_vec(),
            limit: options.limit,
            min_popularity: options.min_popularity,
        };

        attempts += 1;
        match catalog.recommendations(&query).await {
            Ok(tracks) => return (attempts, Some(tracks)),
            Err(e) => warning!(
                "Recommendation attempt {} with {} failed: {}",
                attempts,
                strategy,
                e
            ),
        }
    }

    warning!("All recommendation attempts failed, skipping recommendations.");
    (attempts, None)
}

/// Adds recommended tracks seeded from `seed_pool` to the playlist.
///
/// The first `options.max_seeds` tracks of the pool become seeds. Attempts
/// follow [`SEED_STRATEGIES`]; the first successful one wins. Its tracks are
/// reduced by everything in `known` before they are written.
///
/// # Arguments
///
/// * `catalog` - Catalog to query and write to
/// * `playlist_id` - Destination playlist
/// * `seed_pool` - Tracks to draw seeds from, in priority order
/// * `known` - Tracks that must not be added again
/// * `options` - Seed count, result limit and popularity threshold
///
/// # Returns
///
/// An [`Augmentation`] describing how many requests were sent and which
/// tracks were added. An empty seed pool sends nothing and returns the
/// default value.
///
/// # Errors
///
/// Failed recommendation requests are logged and swallowed. Only a failed
/// write of the recommended tracks is returned as an error.
pub async fn augment(
    catalog: &dyn Catalog,
    playlist_id: &str,
    seed_pool: &TrackSet,
    known: &TrackSet,
    options: &RecommendationOptions,
) -> Result<Augmentation, MergeError> {
    let seeds = seed_ids(seed_pool, options.max_seeds);
    if seeds.is_empty() {
        info!("No seed tracks available, skipping recommendations");
        return Ok(Augmentation::default());
    }

    let (attempts, tracks) = request_recommendations(catalog, &seeds, options).await;
    let Some(tracks) = tracks else {
        return Ok(Augmentation {
            attempts,
            ..Augmentation::default()
        });
    };

    let candidates: TrackSet = tracks.into_iter().map(|t| t.uri).collect();
    let fresh = candidates.difference(known);
    let write_calls = write_tracks(catalog, playlist_id, fresh.as_slice()).await?;

    Ok(Augmentation {
        attempts,
        recommended: fresh.as_slice().to_vec(),
        write_calls,
    })
}
