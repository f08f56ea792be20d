use std::sync::Arc;

use api_client::api::cases::{create_case, delete_case, get_case, list_cases, update_case};
use api_client::MemoryTokenStore;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{
    generate_reference_code, is_reference_code, CaseIntakeForm, CaseStatus, PageQuery,
    UpdateCaseRequest,
};

use crate::common::MockApi;

fn intake() -> CaseIntakeForm {
    CaseIntakeForm {
        title: "Ossada no Capibaribe".to_string(),
        description: "Restos mortais encontrados às margens do rio".to_string(),
        status: CaseStatus::EmAndamento,
        responsavel: "u1".to_string(),
        cidade: "Recife".to_string(),
        estado: "PE".to_string(),
    }
}

#[tokio::test]
async fn create_posts_once_with_reference_code() {
    let api = MockApi::start().await;
    api.respond(
        "POST",
        "/api/cases",
        201,
        json!({ "_id": "c1", "title": "Ossada no Capibaribe", "casoReferencia": "CR-2026-001" }),
    );
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let request = intake().to_request(generate_reference_code()).unwrap();
    let case = create_case(&client, &request).await.unwrap();
    assert_eq!(case.id, "c1");

    let posts = api.requests_to("POST", "/api/cases");
    assert_eq!(posts.len(), 1);
    let body = posts[0].json();
    assert!(is_reference_code(body["casoReferencia"].as_str().unwrap()));
    assert_eq!(body["status"], "Em andamento");
    assert_eq!(body["responsavel"], "u1");
    assert_eq!(posts[0].authorization.as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn list_sends_page_and_status_and_accepts_bare_arrays() {
    let api = MockApi::start().await;
    api.respond(
        "GET",
        "/api/cases",
        200,
        json!([
            { "_id": "c1", "title": "A", "status": "Finalizado" },
            { "_id": "c2", "title": "B", "status": "Finalizado" }
        ]),
    );
    let client = api.client(Arc::new(MemoryTokenStore::new()));

    let page = list_cases(&client, &PageQuery::new(2, 20).with_status("Finalizado"))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total, 2);
    assert_eq!(page.data[0].status, CaseStatus::Finalizado);

    let query = api.requests_to("GET", "/api/cases")[0].query.clone().unwrap();
    assert!(query.contains("page=2"));
    assert!(query.contains("limit=20"));
    assert!(query.contains("status=Finalizado"));
}

#[tokio::test]
async fn update_and_delete_address_the_record() {
    let api = MockApi::start().await;
    api.respond(
        "PUT",
        "/api/cases/c1",
        200,
        json!({ "_id": "c1", "title": "Novo título", "status": "Arquivado" }),
    );
    api.respond("DELETE", "/api/cases/c1", 200, json!({ "message": "Caso removido" }));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let request = UpdateCaseRequest {
        title: "Novo título".to_string(),
        description: String::new(),
        status: CaseStatus::Arquivado,
        responsavel: None,
        cidade: "Recife".to_string(),
        estado: "PE".to_string(),
    };
    let updated = update_case(&client, "c1", &request).await.unwrap();
    assert_eq!(updated.status, CaseStatus::Arquivado);
    assert_eq!(api.requests_to("PUT", "/api/cases/c1")[0].json()["status"], "Arquivado");

    delete_case(&client, "c1").await.unwrap();
    assert_eq!(api.requests_to("DELETE", "/api/cases/c1").len(), 1);
}

#[tokio::test]
async fn edit_refresh_fetches_the_single_record() {
    let api = MockApi::start().await;
    api.respond(
        "GET",
        "/api/cases/c1",
        200,
        json!({ "_id": "c1", "title": "Ossada no Capibaribe", "status": "Em andamento", "cidade": "Recife" }),
    );
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let case = get_case(&client, "c1").await.unwrap();
    assert_eq!(case.cidade, "Recife");
    assert_eq!(case.status, CaseStatus::EmAndamento);
    let gets = api.requests_to("GET", "/api/cases/c1");
    assert_eq!(gets.len(), 1);
    assert_eq!(gets[0].authorization.as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn missing_record_surfaces_the_server_message() {
    let api = MockApi::start().await;
    api.respond("DELETE", "/api/cases/zz", 404, json!({ "message": "Caso não encontrado" }));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let err = delete_case(&client, "zz").await.unwrap_err();
    assert_eq!(err.kind, shared_types::AppErrorKind::NotFound);
    assert_eq!(err.user_message(), "Caso não encontrado");
}
