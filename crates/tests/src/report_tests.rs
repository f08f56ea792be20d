use std::sync::Arc;

use api_client::api::laudos::create_laudo;
use api_client::api::reports::{create_report, list_reports, sign_report, update_report};
use api_client::MemoryTokenStore;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{Attachment, LaudoForm, PageQuery, Report, ReportForm, UpdateReportRequest};

use crate::common::MockApi;

fn report_form() -> ReportForm {
    ReportForm {
        caso: "c1".to_string(),
        titulo: "Relatório odontolegal".to_string(),
        objetivo: "Identificação".to_string(),
        metodologia: "Comparativa".to_string(),
        materiais: "Radiografias".to_string(),
        exames_realizados: "Panorâmica".to_string(),
        consideracoes: "Nenhuma".to_string(),
        conclusao: "Identificação positiva".to_string(),
        evidencias: vec!["e1".to_string(), "e2".to_string()],
        laudos: vec!["l1".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn report_is_multipart_with_audio_and_json_id_lists() {
    let api = MockApi::start().await;
    api.respond("POST", "/api/report", 201, json!({ "_id": "r1", "titulo": "Relatório odontolegal" }));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let mut form = report_form();
    form.audio = Some(Attachment::new("nota.mp3", "audio/mpeg", vec![1, 2, 3]));
    let request = form.to_request().unwrap();
    let report = create_report(&client, &request, form.audio.clone()).await.unwrap();
    assert_eq!(report.id, "r1");
    assert!(!report.assinado);

    let post = &api.requests_to("POST", "/api/report")[0];
    assert!(post.is_multipart());
    let text = post.body_text();
    assert!(text.contains(r#"name="audio"; filename="nota.mp3""#));
    assert!(text.contains(r#"["e1","e2"]"#));
    assert!(text.contains(r#"name="examesRealizados""#));
}

#[tokio::test]
async fn report_without_audio_has_no_file_part() {
    let api = MockApi::start().await;
    api.respond("POST", "/api/report", 201, json!({ "_id": "r2" }));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let request = report_form().to_request().unwrap();
    create_report(&client, &request, None).await.unwrap();

    let post = &api.requests_to("POST", "/api/report")[0];
    assert!(post.is_multipart());
    assert!(!post.body_text().contains(r#"name="audio""#));
}

#[tokio::test]
async fn signing_returns_the_signed_record() {
    let api = MockApi::start().await;
    api.respond("POST", "/api/report/sign/r1", 200, json!({ "_id": "r1", "assinado": true }));
    api.respond(
        "GET",
        "/api/report",
        200,
        json!({ "data": [{ "_id": "r1", "assinado": true }], "total": 1, "page": 1, "totalPages": 1 }),
    );
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let signed = sign_report(&client, "r1").await.unwrap();
    assert!(signed.assinado);

    let page = list_reports(&client, &PageQuery::new(1, 20)).await.unwrap();
    assert_eq!(page.total, 1);
    assert!(page.data[0].assinado);
}

#[tokio::test]
async fn edit_puts_text_sections_as_json() {
    let api = MockApi::start().await;
    let stored = json!({
        "_id": "r1",
        "titulo": "Relatório odontolegal",
        "objetivo": "Identificação",
        "metodologia": "Comparativa",
        "materiais": "Radiografias",
        "examesRealizados": "Panorâmica",
        "consideracoes": "Nenhuma",
        "conclusao": "Identificação positiva",
        "evidencias": ["e1"],
        "assinado": false
    });
    api.respond("PUT", "/api/report/r1", 200, stored.clone());
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let mut report: Report = serde_json::from_value(stored).unwrap();
    report.conclusao = "  Identificação negativa ".to_string();
    let updated = update_report(&client, "r1", &UpdateReportRequest::from(&report))
        .await
        .unwrap();
    assert_eq!(updated.id, "r1");

    let put = &api.requests_to("PUT", "/api/report/r1")[0];
    assert!(!put.is_multipart());
    let body = put.json();
    assert_eq!(body["conclusao"], "Identificação negativa");
    assert_eq!(body["examesRealizados"], "Panorâmica");
    assert!(body.get("evidencias").is_none());
    assert!(body.get("caso").is_none());
}

#[tokio::test]
async fn laudo_is_issued_by_the_signed_in_examiner() {
    let api = MockApi::start().await;
    api.respond("POST", "/api/laudo", 201, json!({ "_id": "l1", "conclusao": "Compatível" }));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let mut form = LaudoForm {
        caso: "c1".to_string(),
        vitima: "v1".to_string(),
        dados_antemortem: "Ficha odontológica".to_string(),
        dados_postmortem: "Arcada completa".to_string(),
        analise_lesoes: "Sem lesões".to_string(),
        conclusao: "Compatível".to_string(),
        ..Default::default()
    };
    form.toggle_evidence("e1");
    form.toggle_evidence("e2");
    form.toggle_evidence("e1");

    let laudo = create_laudo(&client, &form.to_request("u7").unwrap()).await.unwrap();
    assert!(!laudo.is_signed());

    let body = api.requests_to("POST", "/api/laudo")[0].json();
    assert_eq!(body["perito"], "u7");
    assert_eq!(body["evidencias"], json!(["e2"]));
    assert_eq!(body["dadosAntemortem"], "Ficha odontológica");
}
