use crate::merge::{MergeMode, TrackSet};

/// Combines the source track sets according to `mode`.
pub fn resolve(sets: &[TrackSet], mode: MergeMode) -> TrackSet {
    match mode {
        MergeMode::Intersection => intersection(sets),
        MergeMode::Union => union(sets),
    }
}

/// Tracks present in every set, in the order of the first set.
pub fn intersection(sets: &[TrackSet]) -> TrackSet {
    let Some((first, rest)) = sets.split_first() else {
        return TrackSet::new();
    };

    first
        .iter()
        .filter(|uri| rest.iter().all(|set| set.contains(uri)))
        .collect()
}

/// Tracks present in at least one set, in first-seen order.
pub fn union(sets: &[TrackSet]) -> TrackSet {
    sets.iter().flat_map(|set| set.iter()).collect()
}
