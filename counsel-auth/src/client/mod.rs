mod config;
mod credentials;
mod token_storage;

pub use config::Settings;
pub use credentials::Credentials;
pub use token_storage::TokenStore;

use crate::common::StoredToken;
use crate::error::AuthError;
use counsel_api::endpoints::auth::User;
use counsel_api::{CallOptions, Client, Request, RequestContext, SessionHandle};
use std::sync::Arc;

/// Ties the API client, the credential cache and the session together.
pub struct AuthManager {
    client: Client,
    credentials: Arc<Credentials>,
    session: SessionHandle,
}

impl AuthManager {
    pub fn new(client: Client, credentials: Credentials) -> Self {
        let credentials = Arc::new(credentials);
        let session = SessionHandle::new();
        credentials.clear_on_expiry(&session);

        Self {
            client,
            credentials,
            session,
        }
    }

    /// Builds everything from settings and restores a previously saved token.
    pub fn from_settings(settings: &Settings) -> Result<Self, AuthError> {
        settings.validate().map_err(AuthError::Configuration)?;

        let client = Client::with_config(settings.client_config())?;
        let store = match &settings.token_path {
            Some(path) => TokenStore::at(path)?,
            None => TokenStore::new()?,
        };

        let manager = Self::new(client, Credentials::new(store));
        if manager.credentials.restore()? {
            tracing::info!("Restored saved credentials");
        }
        Ok(manager)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials.is_logged_in()
    }

    /// Context for the next authenticated call.
    pub fn context(&self) -> RequestContext {
        self.credentials.context(&self.session)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let response = self
            .client
            .public_call(Request::auth().login(email, password), CallOptions::new())
            .await?;

        self.credentials
            .set_token(StoredToken::new(response.access_token, Some(email.to_string())))?;
        self.session.reset();

        tracing::info!(user_id = %response.user.id, role = %response.user.role, "Logged in");
        Ok(response.user)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.credentials.clear()?;
        self.session.reset();
        tracing::info!("Logged out");
        Ok(())
    }
}
