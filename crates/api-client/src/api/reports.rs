use shared_types::{
    AppError, Attachment, CreateReportRequest, Listing, Page, PageQuery, Report, UpdateReportRequest,
};

use crate::ApiClient;

pub const REPORTS_PATH: &str = "/api/report";

/// Multipart part name of the optional audio note.
pub const AUDIO_PART: &str = "audio";

pub async fn list_reports(client: &ApiClient, query: &PageQuery) -> Result<Page<Report>, AppError> {
    client
        .get_with_query::<Listing<Report>, _>(REPORTS_PATH, query)
        .await
        .map(Listing::into_page)
}

/// Generate a report. Always multipart; the audio part is sent only when present.
pub async fn create_report(
    client: &ApiClient,
    request: &CreateReportRequest,
    audio: Option<Attachment>,
) -> Result<Report, AppError> {
    let files = audio.map(|a| (AUDIO_PART, a)).into_iter().collect();
    client
        .post_multipart(REPORTS_PATH, request.form_fields(), files)
        .await
}

/// Replace a report's text sections. Sent as JSON; audio is never re-uploaded.
pub async fn update_report(
    client: &ApiClient,
    id: &str,
    request: &UpdateReportRequest,
) -> Result<Report, AppError> {
    client.put(&format!("{REPORTS_PATH}/{id}"), request).await
}

/// Ask the server to digitally sign a report; returns the signed record.
pub async fn sign_report(client: &ApiClient, id: &str) -> Result<Report, AppError> {
    client
        .post(&format!("{REPORTS_PATH}/sign/{id}"), &serde_json::json!({}))
        .await
}

pub async fn delete_report(client: &ApiClient, id: &str) -> Result<(), AppError> {
    client.delete(&format!("{REPORTS_PATH}/{id}")).await
}
