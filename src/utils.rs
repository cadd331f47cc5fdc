use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
use url::Url;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts a playlist id from a share URL, a `spotify:` URI or a bare id.
///
/// The id is the trailing segment of the input. Returns `None` when that
/// segment is missing or not a base-62 string.
pub fn playlist_id_from_input(input: &str) -> Option<String> {
    let input = input.trim();

    let candidate = if let Some(rest) = input.strip_prefix("spotify:") {
        rest.rsplit(':').next()?.to_string()
    } else if input.contains('/') {
        let url = if input.contains("://") {
            Url::parse(input).ok()?
        } else {
            Url::parse(&format!("https://{}", input)).ok()?
        };
        url.path_segments()?
            .filter(|segment| !segment.is_empty())
            .last()?
            .to_string()
    } else {
        input.to_string()
    };

    if !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(candidate)
    } else {
        None
    }
}

/// Returns the trailing id of a `spotify:track:<id>` URI.
pub fn track_id_from_uri(uri: &str) -> &str {
    uri.rsplit(':').next().unwrap_or(uri)
}
