use futures_util::{future::try_join_all, try_join};

use crate::{
    info,
    merge::{
        MergeError, MergeMode, MergeOptions, PlaylistRef, TrackSet, augment, collect_tracks,
        resolver, write_tracks,
    },
    spotify::Catalog,
    success,
    types::{CreatePlaylistRequest, MergeRequest, Playlist},
};

pub const MIN_PLAYLISTS: usize = 2;

const PLAYLIST_WEB_URL: &str = "https://open.spotify.com/playlist";

/// A validated merge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeJob {
    playlists: Vec<PlaylistRef>,
    mode: MergeMode,
}

impl MergeJob {
    /// Validates the raw inputs without touching the network.
    pub fn new<S: AsRef<str>>(urls: &[S], mode: &str) -> Result<Self, MergeError> {
        if urls.len() < MIN_PLAYLISTS {
            return Err(MergeError::Validation(format!(
                "At least {} playlist URLs are required.",
                MIN_PLAYLISTS
            )));
        }

        let mode: MergeMode = mode.parse()?;
        let playlists = urls
            .iter()
            .map(|url| PlaylistRef::parse(url.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { playlists, mode })
    }

    pub fn playlists(&self) -> &[PlaylistRef] {
        &self.playlists
    }

    pub fn mode(&self) -> MergeMode {
        self.mode
    }
}

/// What a finished merge produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub playlist_id: String,
    pub playlist_url: String,
    pub name: String,
    pub merged_tracks: usize,
    pub recommended_tracks: usize,
}

/// Name of the destination playlist, e.g. `[Union] Chill & Focus`.
///
/// Every source name is listed, so merges of more than two playlists name all
/// of their sources. Spotify accepts long names; no truncation is applied.
pub fn destination_name(mode: MergeMode, source_names: &[String]) -> String {
    format!("[{}] {}", mode.label(), source_names.join(" & "))
}

/// Description of the destination playlist, e.g. `Union of 'Chill', 'Focus'`.
pub fn destination_description(
    mode: MergeMode,
    source_names: &[String],
    with_recommendations: bool,
) -> String {
    let sources = source_names
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut description = format!("{} of {}", mode.label(), sources);
    if with_recommendations {
        description.push_str(" with recommendations");
    }
    description
}

/// Validates `request` and runs the merge.
///
/// # Errors
///
/// Invalid input is rejected with [`MergeError::Validation`] before the
/// catalog is touched. See [`run`] for the remaining failures.
pub async fn merge_playlists(
    catalog: &dyn Catalog,
    request: &MergeRequest,
    options: &MergeOptions,
) -> Result<MergeOutcome, MergeError> {
    let job = MergeJob::new(&request.urls, &request.merge_mode)?;
    run(catalog, &job, options).await
}

async fn fetch_playlist(
    catalog: &dyn Catalog,
    playlist: &PlaylistRef,
) -> Result<Playlist, MergeError> {
    Ok(catalog.playlist(playlist.id()).await?)
}

/// Runs a validated merge job end to end.
///
/// # Process
///
/// 1. **Collection**: tracks and display names of all sources are fetched
///    concurrently
/// 2. **Creation**: a public playlist is created for the current user
/// 3. **Merge**: the sources are combined by the job's mode and written in
///    chunks
/// 4. **Recommendations**: when the policy applies to the mode, tracks that
///    are not shared by every source seed a recommendation request
///
/// # Arguments
///
/// * `catalog` - Authenticated catalog access
/// * `job` - Validated playlists and mode
/// * `options` - Page size and recommendation settings
///
/// # Returns
///
/// A [`MergeOutcome`] with the new playlist's id, public URL, name and track
/// counts.
///
/// # Errors
///
/// - [`MergeError::Unauthorized`] when Spotify rejects the token at any step
/// - [`MergeError::Provider`] for any other failed collection, creation or
///   write; a playlist created before the failure is left in place
///
/// Failed recommendation requests never fail the merge.
pub async fn run(
    catalog: &dyn Catalog,
    job: &MergeJob,
    options: &MergeOptions,
) -> Result<MergeOutcome, MergeError> {
    info!(
        "Collecting tracks of {} playlists ({})",
        job.playlists.len(),
        job.mode
    );

    let (track_sets, sources): (Vec<TrackSet>, Vec<Playlist>) = try_join!(
        try_join_all(
            job.playlists
                .iter()
                .map(|p| collect_tracks(catalog, p, options.page_size))
        ),
        try_join_all(job.playlists.iter().map(|p| fetch_playlist(catalog, p))),
    )?;

    let names: Vec<String> = sources.into_iter().map(|p| p.name).collect();
    let with_recommendations = options.recommendations.applies_to(job.mode);

    let user = catalog.current_user().await?;
    let request = CreatePlaylistRequest {
        name: destination_name(job.mode, &names),
        description: destination_description(job.mode, &names, with_recommendations),
        public: true,
        collaborative: false,
    };
    let destination = catalog.create_playlist(&user.id, &request).await?;
    success!("Created playlist '{}'", destination.name);

    let merged = resolver::resolve(&track_sets, job.mode);
    let write_calls = write_tracks(catalog, &destination.id, merged.as_slice()).await?;
    info!(
        "Added {} merged tracks in {} request(s)",
        merged.len(),
        write_calls
    );

    let mut recommended_tracks = 0;
    if with_recommendations {
        let known = resolver::union(&track_sets);
        let duplicates = resolver::intersection(&track_sets);
        let seed_pool = known.difference(&duplicates);

        let augmentation = augment(
            catalog,
            &destination.id,
            &seed_pool,
            &known,
            &options.recommendation,
        )
        .await?;
        recommended_tracks = augmentation.recommended.len();
        if recommended_tracks > 0 {
            info!("Added {} recommended tracks", recommended_tracks);
        }
    }

    let playlist_url = destination
        .external_urls
        .spotify
        .clone()
        .unwrap_or_else(|| format!("{}/{}", PLAYLIST_WEB_URL, destination.id));

    Ok(MergeOutcome {
        playlist_id: destination.id,
        playlist_url,
        name: destination.name,
        merged_tracks: merged.len(),
        recommended_tracks,
    })
}
