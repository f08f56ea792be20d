use std::sync::Arc;

use api_client::api::dashboard::fetch_dashboard;
use api_client::{ApiClient, MemoryTokenStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, DashboardFilter};

use crate::common::{closed_port_url, MockApi};

#[tokio::test]
async fn dashboard_loads_every_series_at_once() {
    let api = MockApi::start().await;
    api.respond(
        "GET",
        "/api/dashboardRoutes",
        200,
        json!({
            "totalCasos": 12,
            "totalEvidencias": 30,
            "totalVitimas": 4,
            "totalLaudos": 2,
            "porStatus": [{ "label": "Em andamento", "total": 7 }, { "_id": "Finalizado", "count": 5 }],
            "porSexo": [{ "nome": "feminino", "quantidade": 3 }],
        }),
    );
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let data = fetch_dashboard(&client).await.unwrap();
    assert_eq!(data.total_casos, 12);
    assert_eq!(data.series(DashboardFilter::Status).len(), 2);
    assert_eq!(data.series(DashboardFilter::Sex)[0].total, 3);
    assert!(data.series(DashboardFilter::City).is_empty());
    assert_eq!(api.requests().len(), 1);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let client = ApiClient::new(closed_port_url().await, Arc::new(MemoryTokenStore::new()));
    let err = fetch_dashboard(&client).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Network);
    assert!(err.user_message().contains("conectar"));
}

#[tokio::test]
async fn unknown_route_reports_not_found() {
    let api = MockApi::start().await;
    let client = api.client(Arc::new(MemoryTokenStore::new()));
    // No canned route: the mock answers 404 with its own message.
    let err = fetch_dashboard(&client).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.user_message(), "Rota não encontrada");
}
