use shared_types::{AppError, CreateLaudoRequest, Laudo, Listing, Page, PageQuery};

use crate::ApiClient;

pub const LAUDOS_PATH: &str = "/api/laudo";

pub async fn list_laudos(client: &ApiClient, query: &PageQuery) -> Result<Page<Laudo>, AppError> {
    client
        .get_with_query::<Listing<Laudo>, _>(LAUDOS_PATH, query)
        .await
        .map(Listing::into_page)
}

pub async fn create_laudo(client: &ApiClient, request: &CreateLaudoRequest) -> Result<Laudo, AppError> {
    client.post(LAUDOS_PATH, request).await
}
