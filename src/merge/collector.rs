use crate::{
    merge::{MergeError, PlaylistRef, TrackSet},
    spotify::Catalog,
};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Fetches every track URI of a playlist, page by page.
///
/// Pages are requested strictly in offset order. The reported total is
/// re-read from every page and the loop ends once the offset reaches it, or
/// as soon as a page comes back empty.
///
/// # Arguments
///
/// * `catalog` - Catalog to read the playlist from
/// * `playlist` - Playlist to collect
/// * `page_size` - Items per request, clamped to `1..=MAX_PAGE_SIZE`
///
/// # Returns
///
/// The distinct track URIs in playlist order. Podcast episodes, deleted
/// entries and local files without a URI are skipped.
///
/// # Errors
///
/// Any failed page aborts the collection; there is no partial result. A
/// rejected token surfaces as [`MergeError::Unauthorized`], every other
/// failure as [`MergeError::Provider`].
///
/// # Example
///
/// ```
/// let playlist = PlaylistRef::parse("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M")?;
/// let tracks = collect_tracks(&client, &playlist, DEFAULT_PAGE_SIZE).await?;
/// println!("{} tracks", tracks.len());
/// ```
pub async fn collect_tracks(
    catalog: &dyn Catalog,
    playlist: &PlaylistRef,
    page_size: u32,
) -> Result<TrackSet, MergeError> {
    let limit = page_size.clamp(1, MAX_PAGE_SIZE);
    let mut tracks = TrackSet::new();
    let mut offset: u32 = 0;

    loop {
        let page = catalog
            .playlist_tracks(playlist.id(), limit, offset)
            .await?;

        let fetched = page.items.len() as u32;
        for uri in page.items.iter().filter_map(|item| item.track_uri()) {
            tracks.insert(uri.to_string());
        }

        offset += fetched;
        // an empty page below the total would never advance
        if fetched == 0 || offset >= page.total {
            break;
        }
    }

    Ok(tracks)
}
