use crate::client::TokenStore;
use crate::common::StoredToken;
use crate::error::AuthError;
use counsel_api::{ApiError, RequestContext, SessionHandle};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, PoisonError, RwLock};

/// In-process token cache mirrored into a [`TokenStore`].
///
/// Every write goes to disk first and then to the cache, so the two only
/// diverge when the disk write fails (in which case the cache is untouched).
pub struct Credentials {
    cache: RwLock<Option<SecretString>>,
    store: TokenStore,
}

impl Credentials {
    pub fn new(store: TokenStore) -> Self {
        Self {
            cache: RwLock::new(None),
            store,
        }
    }

    /// Warms the cache from the persisted token. Returns whether one was found.
    pub fn restore(&self) -> Result<bool, AuthError> {
        let token = self.store.load_token()?;
        let found = token.is_some();
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) =
            token.map(|t| SecretString::from(t.access_token));
        tracing::debug!(found, "Restored token cache");
        Ok(found)
    }

    pub fn set_token(&self, token: StoredToken) -> Result<(), AuthError> {
        self.store.save_token(&token)?;
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) =
            Some(SecretString::from(token.access_token));
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.store.delete_token()
    }

    pub fn is_logged_in(&self) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Request context carrying the cached token, if any.
    pub fn context(&self, session: &SessionHandle) -> RequestContext {
        let context = RequestContext::new(session.clone());
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        match cache.as_ref() {
            Some(token) => context.with_token(token.expose_secret()),
            None => context,
        }
    }

    /// Drops both copies of the token when `session` expires.
    pub fn clear_on_expiry(self: &Arc<Self>, session: &SessionHandle) {
        let credentials = Arc::clone(self);
        session.add_listener(move |error: &ApiError| {
            tracing::info!(code = error.code(), "Clearing credentials after session expiry");
            if let Err(e) = credentials.clear() {
                tracing::error!("Failed to clear credentials: {}", e);
            }
        });
    }
}
