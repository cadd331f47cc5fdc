use std::{collections::HashSet, fmt, str::FromStr};

use crate::{merge::MergeError, utils};

/// How the source playlists are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeMode {
    /// Only tracks present in every source playlist.
    Intersection,
    /// Every distinct track of every source playlist.
    Union,
}

impl MergeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMode::Intersection => "intersection",
            MergeMode::Union => "union",
        }
    }

    /// Human readable label used in playlist names.
    pub fn label(&self) -> &'static str {
        match self {
            MergeMode::Intersection => "Intersection",
            MergeMode::Union => "Union",
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeMode {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intersection" => Ok(MergeMode::Intersection),
            "union" => Ok(MergeMode::Union),
            other => Err(MergeError::Validation(format!(
                "Unknown merge mode '{}'. Use 'intersection' or 'union'.",
                other
            ))),
        }
    }
}

/// Identifier of a remote playlist, taken from a user supplied URL or URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRef {
    id: String,
}

impl PlaylistRef {
    pub fn parse(input: &str) -> Result<Self, MergeError> {
        match utils::playlist_id_from_input(input) {
            Some(id) => Ok(Self { id }),
            None => Err(MergeError::Validation(format!(
                "Cannot extract a playlist id from '{}'.",
                input
            ))),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Set of track URIs that remembers first-insertion order.
///
/// Membership and equality ignore order; iteration follows insertion order so
/// that seed selection is reproducible.
#[derive(Debug, Clone, Default)]
pub struct TrackSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl TrackSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `uri`; returns false if it was already present.
    pub(crate) fn insert(&mut self, uri: String) -> bool {
        if self.members.contains(&uri) {
            return false;
        }
        self.members.insert(uri.clone());
        self.order.push(uri);
        true
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.members.contains(uri)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    /// Members of `self` that are not in `other`, in the order of `self`.
    pub fn difference(&self, other: &TrackSet) -> TrackSet {
        self.iter().filter(|uri| !other.contains(uri)).collect()
    }
}

impl PartialEq for TrackSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for TrackSet {}

impl<S: Into<String>> FromIterator<S> for TrackSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TrackSet::new();
        for uri in iter {
            set.insert(uri.into());
        }
        set
    }
}

impl<'a> IntoIterator for &'a TrackSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}
