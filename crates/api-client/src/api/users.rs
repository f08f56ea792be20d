use shared_types::{
    AppError, ChangePasswordRequest, Listing, Page, PageQuery, RegisterUserRequest,
    UpdateUserRequest, User, UserEnvelope,
};

use crate::ApiClient;

pub const USERS_PATH: &str = "/api/user";
pub const PASSWORD_PATH: &str = "/api/user/password";
pub const EXPERTS_PATH: &str = "/api/experts";

pub async fn list_users(client: &ApiClient, query: &PageQuery) -> Result<Page<User>, AppError> {
    client
        .get_with_query::<Listing<User>, _>(USERS_PATH, query)
        .await
        .map(Listing::into_page)
}

pub async fn register_user(
    client: &ApiClient,
    request: &RegisterUserRequest,
) -> Result<User, AppError> {
    client
        .post::<UserEnvelope, _>(USERS_PATH, request)
        .await
        .map(UserEnvelope::into_user)
}

pub async fn update_user(
    client: &ApiClient,
    id: &str,
    request: &UpdateUserRequest,
) -> Result<User, AppError> {
    client
        .put::<UserEnvelope, _>(&format!("{USERS_PATH}/{id}"), request)
        .await
        .map(UserEnvelope::into_user)
}

pub async fn delete_user(client: &ApiClient, id: &str) -> Result<(), AppError> {
    client.delete(&format!("{USERS_PATH}/{id}")).await
}

pub async fn change_password(
    client: &ApiClient,
    request: &ChangePasswordRequest,
) -> Result<(), AppError> {
    client
        .put::<serde_json::Value, _>(PASSWORD_PATH, request)
        .await
        .map(|_| ())
}

/// Users who can be assigned as responsible expert ("perito").
pub async fn list_experts(client: &ApiClient) -> Result<Vec<User>, AppError> {
    client
        .get::<Listing<User>>(EXPERTS_PATH)
        .await
        .map(|listing| listing.into_page().data)
}
