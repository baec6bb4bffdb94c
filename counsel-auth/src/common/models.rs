use chrono::{serde::ts_seconds, DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access token as written to the token file
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub email: Option<String>,
    #[serde(with = "ts_seconds")]
    pub saved_at: DateTime<Utc>,
}

impl StoredToken {
    pub fn new(access_token: impl Into<String>, email: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            email,
            saved_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for StoredToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredToken")
            .field("access_token", &"[REDACTED]")
            .field("email", &self.email)
            .field("saved_at", &self.saved_at)
            .finish()
    }
}
