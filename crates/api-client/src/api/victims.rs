use shared_types::{AppError, Listing, Page, PageQuery, Victim};

use crate::ApiClient;

pub const VICTIMS_PATH: &str = "/api/vitima";

pub async fn list_victims(client: &ApiClient, query: &PageQuery) -> Result<Page<Victim>, AppError> {
    client
        .get_with_query::<Listing<Victim>, _>(VICTIMS_PATH, query)
        .await
        .map(Listing::into_page)
}
