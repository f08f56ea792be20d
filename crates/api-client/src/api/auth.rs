use shared_types::{AppError, LoginRequest, LoginResponse, User, UserEnvelope};

use crate::ApiClient;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const LOGOUT_PATH: &str = "/api/auth/logout";
pub const LOGGED_USER_PATH: &str = "/api/auth/logged-user";

/// Exchange credentials for a token and the user record.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<LoginResponse, AppError> {
    client.post(LOGIN_PATH, request).await
}

/// Invalidate the server-side session.
pub async fn logout(client: &ApiClient) -> Result<(), AppError> {
    client
        .post::<serde_json::Value, _>(LOGOUT_PATH, &serde_json::json!({}))
        .await
        .map(|_| ())
}

/// The user owning the current token.
pub async fn logged_user(client: &ApiClient) -> Result<User, AppError> {
    client
        .get::<UserEnvelope>(LOGGED_USER_PATH)
        .await
        .map(UserEnvelope::into_user)
}
