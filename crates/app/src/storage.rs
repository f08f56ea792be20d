//! Browser-backed [`TokenStore`].
//!
//! `localStorage` is only reachable through async `eval`, while the HTTP
//! client reads the token synchronously. The store therefore keeps an
//! in-memory copy that is hydrated once at startup and written through on
//! every change.

use std::sync::{Mutex, PoisonError};

use api_client::TokenStore;
use dioxus::prelude::*;
use shared_types::TOKEN_STORAGE_KEY;

#[derive(Debug, Default)]
pub struct BrowserTokenStore {
    token: Mutex<Option<String>>,
    hydrated: Mutex<bool>,
}

impl BrowserTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the persisted token once. Later calls are no-ops so a token
    /// saved by this session is never overwritten by a stale read.
    pub async fn hydrate(&self) {
        if *self.hydrated.lock().unwrap_or_else(PoisonError::into_inner) {
            return;
        }
        let stored = read_persisted().await;
        let mut hydrated = self.hydrated.lock().unwrap_or_else(PoisonError::into_inner);
        if !*hydrated {
            *self.token.lock().unwrap_or_else(PoisonError::into_inner) = stored;
            *hydrated = true;
        }
    }
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        *self.hydrated.lock().unwrap_or_else(PoisonError::into_inner) = true;
        document::eval(&set_item_script(token));
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        *self.hydrated.lock().unwrap_or_else(PoisonError::into_inner) = true;
        document::eval(&remove_item_script());
    }
}

fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn get_item_script() -> String {
    format!(
        "return window.localStorage.getItem({});",
        js_string(TOKEN_STORAGE_KEY)
    )
}

fn set_item_script(token: &str) -> String {
    format!(
        "window.localStorage.setItem({}, {});",
        js_string(TOKEN_STORAGE_KEY),
        js_string(token)
    )
}

fn remove_item_script() -> String {
    format!(
        "window.localStorage.removeItem({});",
        js_string(TOKEN_STORAGE_KEY)
    )
}

async fn read_persisted() -> Option<String> {
    match document::eval(&get_item_script()).join::<Option<String>>().await {
        Ok(token) => token.filter(|t| !t.is_empty()),
        Err(e) => {
            tracing::warn!(error = ?e, "Could not read persisted token");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scripts_use_the_single_token_key() {
        assert_eq!(
            get_item_script(),
            r#"return window.localStorage.getItem("token");"#
        );
        assert_eq!(
            remove_item_script(),
            r#"window.localStorage.removeItem("token");"#
        );
    }

    #[test]
    fn token_is_escaped_as_a_js_literal() {
        assert_eq!(
            set_item_script("a\"b"),
            r#"window.localStorage.setItem("token", "a\"b");"#
        );
    }
}
