use shared_types::{
    AppError, Attachment, CreateEvidenceRequest, Evidence, Listing, Page, PageQuery,
    UpdateEvidenceRequest,
};

use crate::ApiClient;

pub const EVIDENCE_PATH: &str = "/api/evidence";

/// Multipart part name of the evidence image.
pub const IMAGE_PART: &str = "imagem";

pub async fn list_evidence(
    client: &ApiClient,
    query: &PageQuery,
) -> Result<Page<Evidence>, AppError> {
    client
        .get_with_query::<Listing<Evidence>, _>(EVIDENCE_PATH, query)
        .await
        .map(Listing::into_page)
}

pub async fn get_evidence(client: &ApiClient, id: &str) -> Result<Evidence, AppError> {
    client.get(&format!("{EVIDENCE_PATH}/{id}")).await
}

/// Create an evidence item: JSON for text, multipart when an image is attached.
pub async fn create_evidence(
    client: &ApiClient,
    request: &CreateEvidenceRequest,
    image: Option<Attachment>,
) -> Result<Evidence, AppError> {
    match image {
        Some(image) => {
            client
                .post_multipart(EVIDENCE_PATH, request.form_fields(), vec![(IMAGE_PART, image)])
                .await
        }
        None => client.post(EVIDENCE_PATH, request).await,
    }
}

pub async fn update_evidence(
    client: &ApiClient,
    id: &str,
    request: &UpdateEvidenceRequest,
) -> Result<Evidence, AppError> {
    client.put(&format!("{EVIDENCE_PATH}/{id}"), request).await
}

pub async fn delete_evidence(client: &ApiClient, id: &str) -> Result<(), AppError> {
    client.delete(&format!("{EVIDENCE_PATH}/{id}")).await
}
