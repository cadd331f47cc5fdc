use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::rejection::JsonRejection,
    http::{HeaderMap, HeaderValue, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
};
use plmerge::api::{self, ApiError, bearer_token};
use plmerge::merge::{MergeError, MergeOptions, RecommendationPolicy};
use plmerge::server::{AppState, router};
use plmerge::types::{ErrorResponse, MergeRequest};
use serde_json::json;
use tokio::sync::Mutex;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn state(api_url: &str) -> AppState {
    AppState {
        pkce: Arc::new(Mutex::new(None)),
        api_url: api_url.to_string(),
        options: MergeOptions {
            recommendations: RecommendationPolicy::Never,
            ..MergeOptions::default()
        },
    }
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

fn request(urls: &[&str], mode: &str) -> MergeRequest {
    MergeRequest {
        urls: urls.iter().map(|u| u.to_string()).collect(),
        merge_mode: mode.to_string(),
    }
}

fn body(urls: &[&str], mode: &str) -> Result<Json<MergeRequest>, JsonRejection> {
    Ok(Json(request(urls, mode)))
}

// Serves the full router on an ephemeral port and returns its base URL.
async fn spawn_server(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn post_merge(base_url: &str, raw_body: &str) -> (reqwest::StatusCode, ErrorResponse) {
    let response = reqwest::Client::new()
        .post(format!("{}/api/merge", base_url))
        .bearer_auth("live-token")
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(raw_body.to_string())
        .send()
        .await
        .unwrap();

    let status = response.status();
    (status, response.json::<ErrorResponse>().await.unwrap())
}

async fn mount_playlist(server: &MockServer, id: &str, name: &str, ids: &[&str]) {
    let items: Vec<_> = ids
        .iter()
        .map(|t| json!({ "track": { "id": t, "name": t, "uri": format!("spotify:track:{}", t), "type": "track" } }))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/playlists/{}/tracks", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": items,
            "total": ids.len(),
            "offset": 0,
            "limit": 50,
            "next": null
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/playlists/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": id, "name": name })))
        .mount(server)
        .await;
}

#[test]
fn test_bearer_token() {
    assert_eq!(bearer_token(&bearer("abc")), Some("abc".to_string()));
    assert_eq!(bearer_token(&HeaderMap::new()), None);

    let mut basic = HeaderMap::new();
    basic.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
    assert_eq!(bearer_token(&basic), None);

    let mut empty = HeaderMap::new();
    empty.insert(AUTHORIZATION, HeaderValue::from_static("Bearer  "));
    assert_eq!(bearer_token(&empty), None);
}

#[test]
fn test_api_error_status() {
    let cases = [
        (MergeError::Validation("bad".into()), StatusCode::BAD_REQUEST),
        (MergeError::Unauthorized("expired".into()), StatusCode::UNAUTHORIZED),
        (
            MergeError::Provider(plmerge::spotify::CatalogError::Parse("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, status) in cases {
        assert_eq!(ApiError(err).into_response().status(), status);
    }
}

#[tokio::test]
async fn test_health() {
    let Json(body) = api::health().await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "plmerge");
}

#[tokio::test]
async fn test_merge_success() {
    let server = MockServer::start().await;
    mount_playlist(&server, "A", "Alpha", &["x", "y"]).await;
    mount_playlist(&server, "B", "Beta", &["y", "z"]).await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer live-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "listener" })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/users/listener/playlists"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "merged",
            "name": "[Intersection] Alpha & Beta"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/playlists/merged/tracks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "s" })))
        .expect(1)
        .mount(&server)
        .await;

    let response = api::merge(
        Extension(state(&server.uri())),
        bearer("live-token"),
        body(&["spotify:playlist:A", "spotify:playlist:B"], "intersection"),
    )
    .await
    .unwrap();

    // no external url in the response, so the web url is derived from the id
    assert_eq!(
        response.0.playlist_url,
        "https://open.spotify.com/playlist/merged"
    );
}

#[tokio::test]
async fn test_merge_validation_before_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = api::merge(
        Extension(state(&server.uri())),
        bearer("live-token"),
        body(&["spotify:playlist:A", "spotify:playlist:B"], "average"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.0.status_code(), 400);

    let err = api::merge(
        Extension(state(&server.uri())),
        HeaderMap::new(),
        body(&["spotify:playlist:A"], "union"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_merge_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "status": 401, "message": "Invalid access token" }
        })))
        .mount(&server)
        .await;

    let err = api::merge(
        Extension(state(&server.uri())),
        bearer("stale"),
        body(&["spotify:playlist:A", "spotify:playlist:B"], "union"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, MergeError::Unauthorized(_)));
    assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_merge_provider_failure() {
    let server = MockServer::start().await;
    mount_playlist(&server, "A", "Alpha", &["x"]).await;

    Mock::given(method("GET"))
        .and(path("/playlists/B/tracks"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/playlists/B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "B", "name": "Beta" })))
        .mount(&server)
        .await;

    let err = api::merge(
        Extension(state(&server.uri())),
        bearer("live-token"),
        body(&["spotify:playlist:A", "spotify:playlist:B"], "union"),
    )
    .await
    .unwrap_err();

    assert_eq!(err.0.status_code(), 500);
    assert!(err.0.to_string().contains("boom"));
}

#[tokio::test]
async fn test_missing_urls_is_a_validation_error() {
    let spotify = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&spotify)
        .await;
    let base_url = spawn_server(state(&spotify.uri())).await;

    let (status, error) = post_merge(&base_url, r#"{"mergeMode":"union"}"#).await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(error.status_code, 400);
    assert!(error.message.contains("At least 2"));

    let (status, error) = post_merge(&base_url, "{}").await;
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(error.status_code, 400);
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() {
    let spotify = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&spotify)
        .await;
    let base_url = spawn_server(state(&spotify.uri())).await;

    for raw_body in [r#"{"urls":null}"#, r#"{"urls":"spotify:playlist:A"}"#, "not json"] {
        let (status, error) = post_merge(&base_url, raw_body).await;
        assert_eq!(status, reqwest::StatusCode::BAD_REQUEST, "body: {}", raw_body);
        assert_eq!(error.status_code, 400);
        assert!(error.message.starts_with("Invalid merge request"));
    }
}

#[test]
fn test_merge_request_defaults() {
    let request: MergeRequest = serde_json::from_str("{}").unwrap();
    assert!(request.urls.is_empty());
    assert_eq!(request.merge_mode, "intersection");
}
