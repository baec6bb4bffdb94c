use crate::common::StoredToken;
use crate::error::AuthError;
use std::fs;
use std::path::{Path, PathBuf};

const TOKEN_FILE: &str = "token.json";

/// The persisted copy of the access token.
pub struct TokenStore {
    token_path: PathBuf,
}

impl TokenStore {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = Self::get_cache_dir()?;
        Self::at(cache_dir.join(TOKEN_FILE))
    }

    /// Store the token at an explicit location.
    pub fn at(token_path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let token_path = token_path.into();

        if let Some(dir) = token_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to create cache directory: {}", e))
                })?;
            }
        }

        Ok(Self { token_path })
    }

    fn get_cache_dir() -> Result<PathBuf, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("counsel");
        Ok(cache_dir)
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }

    pub fn save_token(&self, token: &StoredToken) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(token)?;

        fs::write(&self.token_path, json)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.token_path)
                .map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.token_path, perms).map_err(|e| {
                AuthError::TokenStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        tracing::debug!(path = %self.token_path.display(), "Token saved");
        Ok(())
    }

    pub fn load_token(&self) -> Result<Option<StoredToken>, AuthError> {
        if !self.token_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.token_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to read token: {}", e)))?;

        let token: StoredToken = serde_json::from_str(&json)?;
        Ok(Some(token))
    }

    pub fn delete_token(&self) -> Result<(), AuthError> {
        if self.token_path.exists() {
            fs::remove_file(&self.token_path)
                .map_err(|e| AuthError::TokenStorage(format!("Failed to delete token: {}", e)))?;
            tracing::debug!(path = %self.token_path.display(), "Token deleted");
        }
        Ok(())
    }
}
