use api_client::api::dashboard::fetch_dashboard;
use dioxus::prelude::*;
use shared_types::{share_percent, Capability, DashboardData, DashboardFilter, DASHBOARD_FILTERS};
use shared_ui::{
    BarChart, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableHeader, DataTableRow,
    LoadingRows, PageHeader,
};

use crate::auth::use_auth;
use crate::capability_gate::RequireCapability;

/// Dashboard: totals plus one chart and table whose dimension is picked locally.
/// Every series arrives in the single aggregate payload, so switching the
/// filter never goes back to the network.
#[component]
pub fn Dashboard() -> Element {
    rsx! {
        RequireCapability { required: Capability::ViewDashboard, DashboardPage {} }
    }
}

#[component]
fn DashboardPage() -> Element {
    let auth = use_auth();
    let filter = use_signal(DashboardFilter::default);

    let mut data = use_resource(move || async move {
        let client = auth.client();
        auth.checked(fetch_dashboard(&client).await)
    });

    let result = data.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        div { class: "container",
            PageHeader { title: "Painel" }

            match result {
                None => rsx! { LoadingRows {} },
                Some(Err(err)) => rsx! {
                    Card {
                        CardHeader {
                            CardTitle { "Erro" }
                            CardDescription { "Não foi possível carregar o painel." }
                        }
                        CardContent {
                            p { class: "error-line", "{err.user_message()}" }
                            Button {
                                variant: ButtonVariant::Primary,
                                onclick: move |_| data.restart(),
                                "Tentar novamente"
                            }
                        }
                    }
                },
                Some(Ok(stats)) => rsx! {
                    StatsGrid { stats: stats.clone() }
                    SeriesCard { stats, filter }
                },
            }
        }
    }
}

#[component]
fn StatsGrid(stats: DashboardData) -> Element {
    let tiles = [
        ("Casos", stats.total_casos),
        ("Evidências", stats.total_evidencias),
        ("Vítimas", stats.total_vitimas),
        ("Laudos", stats.total_laudos),
    ];

    rsx! {
        div { class: "dashboard-stats",
            for (label, value) in tiles {
                Card { key: "{label}", class: "dashboard-stat",
                    CardContent {
                        span { class: "dashboard-stat-value", "{value}" }
                        span { class: "dashboard-stat-label", "{label}" }
                    }
                }
            }
        }
    }
}

#[component]
fn SeriesCard(stats: DashboardData, mut filter: Signal<DashboardFilter>) -> Element {
    let selected = *filter.read();
    let points: Vec<(String, u64)> = stats
        .series(selected)
        .iter()
        .map(|p| (p.label.clone(), p.total))
        .collect();
    let total = stats.series_total(selected);

    rsx! {
        Card { class: "dashboard-series",
            CardHeader {
                CardTitle { "Distribuição por {selected.label().to_lowercase()}" }
            }
            CardContent {
                div { class: "dashboard-filters", role: "group",
                    for option in DASHBOARD_FILTERS.iter().copied() {
                        Button {
                            key: "{option.label()}",
                            variant: if option == selected { ButtonVariant::Primary } else { ButtonVariant::Outline },
                            onclick: move |_| filter.set(option),
                            "{option.label()}"
                        }
                    }
                }
                BarChart { points: points.clone() }
                if !points.is_empty() {
                    DataTable { caption: "{selected.label()}",
                        DataTableHeader {
                            DataTableColumn { "Categoria" }
                            DataTableColumn { "Quantidade" }
                            DataTableColumn { "%" }
                        }
                        DataTableBody {
                            for (label, value) in points {
                                DataTableRow { key: "{label}",
                                    DataTableCell { "{label}" }
                                    DataTableCell { "{value}" }
                                    DataTableCell { "{share_percent(value, total)}%" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
