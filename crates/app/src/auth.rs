use std::sync::Arc;

use api_client::{ApiClient, Session, SessionState};
use dioxus::prelude::*;
use shared_types::{can, AppError, Capability, User};

use crate::storage::BrowserTokenStore;

/// Global authentication state.
///
/// `Session` owns the token and the state machine; `state` mirrors it into
/// a signal so pages re-render on login, logout and expiry.
#[derive(Clone, Copy)]
pub struct AuthState {
    session: CopyValue<Session>,
    store: CopyValue<Arc<BrowserTokenStore>>,
    pub state: Signal<SessionState>,
}

impl AuthState {
    pub fn new(base_url: &str) -> Self {
        let store = Arc::new(BrowserTokenStore::new());
        let client = ApiClient::new(base_url, store.clone());
        Self {
            session: CopyValue::new(Session::new(client)),
            store: CopyValue::new(store),
            state: Signal::new(SessionState::Unauthenticated),
        }
    }

    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    /// The API client every page calls through.
    pub fn client(&self) -> ApiClient {
        self.session.read().client().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().user().is_some()
    }

    fn sync(&mut self) {
        let next = self.session.read().state();
        self.state.set(next);
    }

    /// Restore the session on mount: load the persisted token and re-validate it.
    pub async fn restore(mut self) {
        let store = self.store.read().clone();
        store.hydrate().await;
        self.state.set(SessionState::Loading);
        let session = self.session();
        if let Err(err) = session.fetch_logged_user().await {
            tracing::info!(error = %err, "Stored session rejected");
        }
        self.sync();
    }

    pub async fn login(mut self, email: String, password: String) -> Result<User, AppError> {
        self.state.set(SessionState::Loading);
        let session = self.session();
        let result = session.login(&email, &password).await;
        self.sync();
        result
    }

    pub async fn logout(mut self) {
        let session = self.session();
        session.logout().await;
        self.sync();
    }

    /// React to an API error. A 401 ends the session and sends the user to
    /// the login page; other errors are left to the caller.
    pub fn handle_error(&mut self, err: &AppError) {
        if err.is_unauthorized() {
            self.session.read().expire();
            self.sync();
            navigator().push(crate::routes::Route::Login {});
        }
    }
}

impl AuthState {
    /// Pass `result` through, ending the session first when it is a 401.
    pub fn checked<T>(mut self, result: Result<T, AppError>) -> Result<T, AppError> {
        if let Err(err) = &result {
            self.handle_error(err);
        }
        result
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Whether the signed-in user holds `capability`.
pub fn use_can(capability: Capability) -> bool {
    let auth = use_auth();
    let state = auth.state.read();
    let allowed = state.user().is_some_and(|user| can(user, capability));
    allowed
}
