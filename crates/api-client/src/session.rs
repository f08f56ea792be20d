//! The single session authority.
//!
//! The token is acquired at login, checked by `fetch_logged_user`, and
//! invalidated at logout or on any 401. All pages read the session through
//! [`Session::state`]; nothing else touches the token store.

use std::sync::{Arc, Mutex, PoisonError};

use shared_types::{AppError, AppErrorKind, LoginForm, User};

use crate::api::auth;
use crate::ApiClient;

/// `Unauthenticated → Loading → Authenticated(User) | Failed(message)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Loading,
    Authenticated(User),
    Failed(String),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct Session {
    client: ApiClient,
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(SessionState::Unauthenticated)),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self) -> SessionState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_token(&self) -> bool {
        self.client.tokens().load().is_some()
    }

    fn set(&self, next: SessionState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Exchange credentials for a token. Blank credentials fail without a
    /// network call.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let form = LoginForm {
            email: email.to_string(),
            senha: password.to_string(),
        };
        let missing = form.missing_fields();
        if !missing.is_empty() {
            let err = AppError::missing_fields(&missing);
            self.set(SessionState::Failed(err.user_message()));
            return Err(err);
        }

        self.set(SessionState::Loading);
        let request = form.to_request();
        match auth::login(&self.client, &request).await {
            Ok(response) => {
                self.client.tokens().save(&response.token);
                tracing::info!(user_id = %response.user.id, "Signed in");
                self.set(SessionState::Authenticated(response.user.clone()));
                Ok(response.user)
            }
            Err(err) => {
                self.set(SessionState::Failed(err.user_message()));
                Err(err)
            }
        }
    }

    /// Re-validate the stored token. Without a token this returns `None`
    /// and makes no call; any failure clears the token.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_logged_user(&self) -> Result<Option<User>, AppError> {
        if !self.has_token() {
            self.set(SessionState::Unauthenticated);
            return Ok(None);
        }

        self.set(SessionState::Loading);
        match auth::logged_user(&self.client).await {
            Ok(user) => {
                self.set(SessionState::Authenticated(user.clone()));
                Ok(Some(user))
            }
            Err(err) => {
                self.client.tokens().clear();
                let next = match err.kind {
                    AppErrorKind::Unauthorized | AppErrorKind::Forbidden => {
                        SessionState::Unauthenticated
                    }
                    _ => SessionState::Failed(err.user_message()),
                };
                self.set(next);
                Err(err)
            }
        }
    }

    /// End the session. The local token is cleared even when the server
    /// call fails.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) {
        if self.has_token() {
            if let Err(err) = auth::logout(&self.client).await {
                tracing::warn!(error = %err, "Server logout failed");
            }
        }
        self.client.tokens().clear();
        self.set(SessionState::Unauthenticated);
        tracing::info!("Signed out");
    }

    /// Forced logout after a 401 elsewhere in the app.
    pub fn expire(&self) {
        self.client.tokens().clear();
        self.set(SessionState::Unauthenticated);
        tracing::info!("Session expired");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{MemoryTokenStore, TokenStore};
    use pretty_assertions::assert_eq;

    // Port 9 (discard) is never contacted in these tests; a call would fail.
    fn session_with(store: Arc<MemoryTokenStore>) -> Session {
        Session::new(ApiClient::new("http://127.0.0.1:9", store))
    }

    #[tokio::test]
    async fn blank_password_fails_without_network() {
        let session = session_with(Arc::new(MemoryTokenStore::new()));
        let err = session.login("ana@odx.test", "").await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Validation);
        assert!(err.field_errors.contains_key("senha"));
        assert!(matches!(session.state(), SessionState::Failed(_)));
    }

    #[tokio::test]
    async fn no_token_means_unauthenticated_without_network() {
        let session = session_with(Arc::new(MemoryTokenStore::new()));
        assert_eq!(session.fetch_logged_user().await.unwrap(), None);
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[test]
    fn expire_clears_token() {
        let store = Arc::new(MemoryTokenStore::with_token("t"));
        let session = session_with(store.clone());
        assert!(session.has_token());
        session.expire();
        assert_eq!(store.load(), None);
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_eq!(session.state().user(), None);
    }
}
