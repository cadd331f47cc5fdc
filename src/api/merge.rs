use axum::{
    Extension, Json,
    extract::rejection::JsonRejection,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};

use crate::{
    management::TokenManager,
    merge::{MergeError, MergeJob, run as run_merge},
    server::AppState,
    spotify::SpotifyClient,
    success,
    types::{ErrorResponse, MergeRequest, MergeResponse},
    warning,
};

/// A [`MergeError`] rendered as `{statusCode, message}` JSON.
#[derive(Debug)]
pub struct ApiError(pub MergeError);

impl From<MergeError> for ApiError {
    fn from(err: MergeError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.0.status_code();
        let status =
            StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            status_code,
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Returns the token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// `POST /api/merge`
///
/// A body that is not a merge request is answered like any other validation
/// failure, with a 400 `{statusCode, message}` body.
pub async fn merge(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    payload: Result<Json<MergeRequest>, JsonRejection>,
) -> Result<Json<MergeResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        MergeError::Validation(format!("Invalid merge request: {}", rejection.body_text()))
    })?;
    let job = MergeJob::new(&request.urls, &request.merge_mode)?;

    let access_token = match bearer_token(&headers) {
        Some(token) => token,
        None => TokenManager::stored_access_token().await?,
    };

    let client = SpotifyClient::new(&state.api_url, &access_token).map_err(MergeError::from)?;
    match run_merge(&client, &job, &state.options).await {
        Ok(outcome) => {
            success!("Merged playlist available at {}", outcome.playlist_url);
            Ok(Json(MergeResponse {
                playlist_url: outcome.playlist_url,
            }))
        }
        Err(e) => {
            warning!("Merge failed: {}", e);
            Err(ApiError(e))
        }
    }
}
