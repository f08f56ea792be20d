use shared_types::{AppError, Case, CreateCaseRequest, Listing, Page, PageQuery, UpdateCaseRequest};

use crate::ApiClient;

pub const CASES_PATH: &str = "/api/cases";

pub async fn list_cases(client: &ApiClient, query: &PageQuery) -> Result<Page<Case>, AppError> {
    client
        .get_with_query::<Listing<Case>, _>(CASES_PATH, query)
        .await
        .map(Listing::into_page)
}

pub async fn get_case(client: &ApiClient, id: &str) -> Result<Case, AppError> {
    client.get(&format!("{CASES_PATH}/{id}")).await
}

pub async fn create_case(client: &ApiClient, request: &CreateCaseRequest) -> Result<Case, AppError> {
    client.post(CASES_PATH, request).await
}

pub async fn update_case(
    client: &ApiClient,
    id: &str,
    request: &UpdateCaseRequest,
) -> Result<Case, AppError> {
    client.put(&format!("{CASES_PATH}/{id}"), request).await
}

pub async fn delete_case(client: &ApiClient, id: &str) -> Result<(), AppError> {
    client.delete(&format!("{CASES_PATH}/{id}")).await
}
