use std::sync::Arc;

use api_client::api::evidence::{create_evidence, get_evidence, list_evidence, update_evidence};
use api_client::MemoryTokenStore;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{
    Attachment, BodyCondition, Evidence, EvidenceIntakeForm, EvidenceKind, PageQuery, Sex,
    UpdateEvidenceRequest, VictimIdentification,
};

use crate::common::MockApi;

fn evidence_json(tipo: &str) -> serde_json::Value {
    json!({
        "_id": "e1",
        "caso": { "_id": "c1", "title": "Ossada" },
        "tipo": tipo,
        "categoria": "Arcada dentária",
        "vitima": "nao identificada",
        "sexo": "indeterminado",
        "estadoCorpo": "esqueleto",
    })
}

fn intake(tipo: EvidenceKind) -> EvidenceIntakeForm {
    EvidenceIntakeForm {
        caso: "c1".to_string(),
        tipo,
        categoria: "Arcada dentária".to_string(),
        coletado_por: "u1".to_string(),
        vitima: Some(VictimIdentification::NaoIdentificada),
        sexo: Some(Sex::Indeterminado),
        estado_corpo: Some(BodyCondition::Esqueleto),
        ..Default::default()
    }
}

#[tokio::test]
async fn text_evidence_is_sent_as_json() {
    let api = MockApi::start().await;
    api.respond("POST", "/api/evidence", 201, evidence_json("text"));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let mut form = intake(EvidenceKind::Text);
    form.conteudo = "Fragmento de mandíbula".to_string();
    let request = form.to_request().unwrap();
    create_evidence(&client, &request, form.attachment().cloned())
        .await
        .unwrap();

    let post = &api.requests_to("POST", "/api/evidence")[0];
    assert!(!post.is_multipart());
    let body = post.json();
    assert_eq!(body["tipo"], "text");
    assert_eq!(body["conteudo"], "Fragmento de mandíbula");
    assert_eq!(body["coletadoPor"], "u1");
}

#[tokio::test]
async fn image_evidence_is_multipart_with_the_file() {
    let api = MockApi::start().await;
    api.respond("POST", "/api/evidence", 201, evidence_json("image"));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let mut form = intake(EvidenceKind::Image);
    form.imagem = Some(Attachment::new("foto.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]));
    let request = form.to_request().unwrap();
    let created = create_evidence(&client, &request, form.attachment().cloned())
        .await
        .unwrap();
    assert_eq!(created.tipo, EvidenceKind::Image);
    assert_eq!(created.caso_label(), "Ossada");

    let post = &api.requests_to("POST", "/api/evidence")[0];
    assert!(post.is_multipart());
    assert_eq!(post.authorization.as_deref(), Some("Bearer tok"));
    let text = post.body_text();
    assert!(text.contains(r#"name="imagem"; filename="foto.jpg""#));
    assert!(text.contains("image/jpeg"));
    assert!(text.contains(r#"name="estadoCorpo""#));
    assert!(!text.contains(r#"name="conteudo""#));
}

#[tokio::test]
async fn edit_sends_editable_fields_only() {
    let api = MockApi::start().await;
    api.respond("PUT", "/api/evidence/e1", 200, evidence_json("text"));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let mut evidence: Evidence = serde_json::from_value(evidence_json("text")).unwrap();
    evidence.categoria = "  Dente isolado ".to_string();
    evidence.sexo = Some(Sex::Feminino);
    update_evidence(&client, "e1", &UpdateEvidenceRequest::from(&evidence))
        .await
        .unwrap();

    let body = api.requests_to("PUT", "/api/evidence/e1")[0].json();
    assert_eq!(body["categoria"], "Dente isolado");
    assert_eq!(body["sexo"], "feminino");
    assert!(body.get("tipo").is_none());
    assert!(body.get("caso").is_none());
}

#[tokio::test]
async fn sparse_records_do_not_break_the_listing() {
    let api = MockApi::start().await;
    api.respond(
        "GET",
        "/api/evidence",
        200,
        json!([evidence_json("image"), { "_id": "e2", "tipo": "text", "categoria": "Nota", "conteudo": "x" }]),
    );
    api.respond("GET", "/api/evidence/e2", 200, json!({ "_id": "e2", "categoria": "Nota" }));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let page = list_evidence(&client, &PageQuery::default()).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[1].vitima, None);
    assert_eq!(page.data[1].vitima_label(), "—");

    let single = get_evidence(&client, "e2").await.unwrap();
    assert_eq!(single.tipo, EvidenceKind::Image);
    assert_eq!(single.sexo, None);
}
