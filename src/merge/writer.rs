use crate::{merge::MergeError, spotify::Catalog};

/// Spotify accepts at most 100 URIs per append call.
pub const MAX_TRACKS_PER_WRITE: usize = 100;

/// Appends `uris` to a playlist in chunks, one call after the other.
///
/// # Returns
///
/// The number of append calls issued, `ceil(uris.len() / 100)`. An empty
/// slice issues no call at all.
///
/// # Errors
///
/// A failed chunk stops the remaining ones; chunks already written stay on
/// the playlist.
pub async fn write_tracks(
    catalog: &dyn Catalog,
    playlist_id: &str,
    uris: &[String],
) -> Result<usize, MergeError> {
    let mut calls = 0;

    for chunk in uris.chunks(MAX_TRACKS_PER_WRITE) {
        catalog.add_tracks(playlist_id, chunk).await?;
        calls += 1;
    }

    Ok(calls)
}
