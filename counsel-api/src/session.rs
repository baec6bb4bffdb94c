use crate::error::ApiError;
use secrecy::SecretString;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Active,
    Expired,
}

/// Notified once when the server rejects the current credential.
pub trait SessionListener: Send + Sync {
    fn session_expired(&self, error: &ApiError);
}

impl<F> SessionListener for F
where
    F: Fn(&ApiError) + Send + Sync,
{
    fn session_expired(&self, error: &ApiError) {
        self(error)
    }
}

struct SessionInner {
    status: watch::Sender<SessionStatus>,
    listeners: RwLock<Vec<Arc<dyn SessionListener>>>,
}

/// Shared session state written by the request layer and read by the shell.
///
/// Clones share the same state. The shell can either poll
/// [`SessionHandle::is_expired`], wait on [`SessionHandle::subscribe`], or
/// register a [`SessionListener`].
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<SessionInner>,
}

impl SessionHandle {
    pub fn new() -> Self {
        let (status, _) = watch::channel(SessionStatus::Active);
        Self {
            inner: Arc::new(SessionInner {
                status,
                listeners: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn status(&self) -> SessionStatus {
        *self.inner.status.borrow()
    }

    pub fn is_expired(&self) -> bool {
        self.status() == SessionStatus::Expired
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.inner.status.subscribe()
    }

    pub fn add_listener<L>(&self, listener: L)
    where
        L: SessionListener + 'static,
    {
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Flags the session as expired. Listeners only run on the transition
    /// from active to expired, so repeated 401s notify once.
    pub fn mark_expired(&self, error: &ApiError) {
        let changed = self.inner.status.send_if_modified(|status| {
            if *status == SessionStatus::Expired {
                false
            } else {
                *status = SessionStatus::Expired;
                true
            }
        });
        if !changed {
            return;
        }

        tracing::warn!(code = error.code(), "Session expired: {}", error.message());

        let listeners = self
            .inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener.session_expired(error);
        }
    }

    /// Back to active, e.g. after a fresh login.
    pub fn reset(&self) {
        self.inner.status.send_replace(SessionStatus::Active);
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

/// Everything an authenticated call needs, passed explicitly per call.
#[derive(Debug)]
pub struct RequestContext {
    token: Option<SecretString>,
    session: SessionHandle,
}

impl RequestContext {
    pub fn new(session: SessionHandle) -> Self {
        Self {
            token: None,
            session,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }
}
