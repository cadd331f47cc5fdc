use thiserror::Error;

use crate::spotify::CatalogError;

/// Failure of a merge operation, as reported to the user.
///
/// Failed recommendation requests never show up here; the engine recovers from
/// them locally and the merge still succeeds.
#[derive(Error, Debug)]
pub enum MergeError {
    /// Bad input, detected before any request is sent.
    #[error("{0}")]
    Validation(String),

    /// Missing or expired access token, at start or rejected mid-operation.
    #[error("{0}")]
    Unauthorized(String),

    /// Any other failed Spotify call.
    #[error("Spotify API request failed: {0}")]
    Provider(#[source] CatalogError),
}

impl MergeError {
    /// HTTP-style status code of the error.
    pub fn status_code(&self) -> u16 {
        match self {
            MergeError::Validation(_) => 400,
            MergeError::Unauthorized(_) => 401,
            MergeError::Provider(_) => 500,
        }
    }
}

impl From<CatalogError> for MergeError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Unauthorized(message) => MergeError::Unauthorized(format!(
                "Authorization expired or was rejected, please log in again. ({})",
                message
            )),
            other => MergeError::Provider(other),
        }
    }
}
