use chrono::Utc;
use plmerge::management::TokenManager;
use plmerge::merge::MergeError;
use plmerge::types::Token;
use tempfile::TempDir;

fn token(obtained_secs_ago: u64, expires_in: u64) -> Token {
    Token {
        access_token: "BQC-cached".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "playlist-modify-public".to_string(),
        expires_in,
        obtained_at: Utc::now().timestamp() as u64 - obtained_secs_ago,
    }
}

#[tokio::test]
async fn test_fresh_token_is_returned() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache/token.json");

    TokenManager::new(token(0, 3600)).persist_to(&path).await.unwrap();

    let access_token = TokenManager::stored_access_token_from(&path).await.unwrap();
    assert_eq!(access_token, "BQC-cached");
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token.json");

    TokenManager::new(token(7200, 3600)).persist_to(&path).await.unwrap();

    let err = TokenManager::stored_access_token_from(&path).await.unwrap_err();
    assert!(matches!(err, MergeError::Unauthorized(_)));
    assert_eq!(err.status_code(), 401);
}

#[tokio::test]
async fn test_token_close_to_expiry_is_unauthorized() {
    let manager = TokenManager::new(token(3570, 3600));
    assert!(manager.is_expired());
    assert_eq!(manager.access_token().unwrap_err().status_code(), 401);
}

#[tokio::test]
async fn test_missing_cache_is_unauthorized() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");

    let err = TokenManager::stored_access_token_from(&path).await.unwrap_err();
    assert!(matches!(err, MergeError::Unauthorized(_)));
    assert_eq!(err.status_code(), 401);
}

#[tokio::test]
async fn test_corrupt_cache_is_unauthorized() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token.json");
    std::fs::write(&path, "{ not a token").unwrap();

    let err = TokenManager::stored_access_token_from(&path).await.unwrap_err();
    assert_eq!(err.status_code(), 401);
}

#[tokio::test]
async fn test_persist_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/dir/token.json");

    TokenManager::new(token(10, 3600)).persist_to(&path).await.unwrap();
    let loaded = TokenManager::load_from(&path).await.unwrap();

    assert!(!loaded.is_expired());
    assert_eq!(loaded.access_token().unwrap(), "BQC-cached");
}
