use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{merge::MergeError, types::Token};

/// Seconds before the real expiry at which a token is treated as expired.
const EXPIRY_MARGIN: u64 = 60;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        Self::load_from(&Self::token_path()).await
    }

    pub async fn load_from(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        self.persist_to(&Self::token_path()).await
    }

    pub async fn persist_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Loads the cached token and returns its access token if still valid.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Unauthorized`] when no token is cached or the
    /// cached token has expired.
    pub async fn stored_access_token() -> Result<String, MergeError> {
        Self::stored_access_token_from(&Self::token_path()).await
    }

    /// Same as [`TokenManager::stored_access_token`], reading the cache at `path`.
    pub async fn stored_access_token_from(path: &Path) -> Result<String, MergeError> {
        let manager = Self::load_from(path).await.map_err(|e| {
            MergeError::Unauthorized(format!(
                "No stored login found, please run plmerge auth. ({})",
                e
            ))
        })?;
        manager.access_token().map(str::to_string)
    }

    /// The access token, unless it has expired.
    ///
    /// Tokens are never refreshed here; an expired token means logging in again.
    pub fn access_token(&self) -> Result<&str, MergeError> {
        if self.is_expired() {
            return Err(MergeError::Unauthorized(
                "Access token expired, please run plmerge auth.".to_string(),
            ));
        }
        Ok(&self.token.access_token)
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN >= self.token.obtained_at + self.token.expires_in
    }

    pub fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("plmerge/cache/token.json");
        path
    }
}
