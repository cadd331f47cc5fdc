use std::{sync::Arc, time::Duration};

use plmerge::spotify::auth::{TokenEndpoint, complete_login};
use plmerge::types::PkceToken;
use serde_json::json;
use tokio::sync::Mutex;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

fn endpoint(server: &MockServer) -> TokenEndpoint {
    TokenEndpoint {
        url: format!("{}/api/token", server.uri()),
        client_id: "client-123".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
    }
}

fn pending_login() -> Arc<Mutex<Option<PkceToken>>> {
    Arc::new(Mutex::new(Some(PkceToken {
        code_verifier: "verifier-abc".to_string(),
        token: None,
    })))
}

#[tokio::test]
async fn test_complete_login_stores_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("code_verifier=verifier-abc"))
        .and(body_string_contains("code=auth-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "BQC-new",
            "token_type": "Bearer",
            "scope": "playlist-modify-public",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = pending_login();
    let token = complete_login(&state, &endpoint(&server), "auth-code")
        .await
        .unwrap();

    assert_eq!(token.access_token, "BQC-new");
    assert_eq!(token.refresh_token, "");
    let stored = state.lock().await;
    assert_eq!(
        stored.as_ref().and_then(|p| p.token.as_ref()).map(|t| t.access_token.as_str()),
        Some("BQC-new")
    );
}

#[tokio::test]
async fn test_state_is_unlocked_during_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "BQC-slow", "expires_in": 3600 }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let state = pending_login();
    let endpoint = endpoint(&server);

    let login = tokio::spawn({
        let state = Arc::clone(&state);
        async move { complete_login(&state, &endpoint, "auth-code").await }
    });

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(state.try_lock().is_ok());

    let token = login.await.unwrap().unwrap();
    assert_eq!(token.access_token, "BQC-slow");
}

#[tokio::test]
async fn test_complete_login_without_pending_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = Arc::new(Mutex::new(None));
    let err = complete_login(&state, &endpoint(&server), "auth-code")
        .await
        .unwrap_err();
    assert!(err.contains("Missing PKCE code verifier"));
}

#[tokio::test]
async fn test_rejected_exchange_leaves_state_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let state = pending_login();
    let err = complete_login(&state, &endpoint(&server), "auth-code")
        .await
        .unwrap_err();

    assert!(err.contains("invalid_grant"));
    assert!(state.lock().await.as_ref().unwrap().token.is_none());
}
