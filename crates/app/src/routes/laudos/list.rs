use api_client::api::laudos::list_laudos;
use dioxus::prelude::*;
use shared_types::{filter_by_text, Capability, Laudo, PageQuery};
use shared_ui::{
    Badge, Tone, Button, ButtonVariant, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableHeader, DataTableRow, Input, LoadingRows, PageHeader,
    Pagination, SearchBar,
};

use crate::auth::{use_auth, use_can};
use crate::components::{ListError, ListSection};
use crate::format_helpers::{format_date, signature_fingerprint};
use crate::routes::Route;

const PAGE_SIZE: u32 = 20;

#[component]
pub fn LaudoListPage() -> Element {
    let auth = use_auth();
    let can_issue = use_can(Capability::IssueLaudo);
    let page = use_signal(|| 1u32);
    let mut search = use_signal(String::new);

    let mut data = use_resource(move || {
        let query = PageQuery::new(*page.read(), PAGE_SIZE);
        async move {
            let client = auth.client();
            auth.checked(list_laudos(&client, &query).await)
        }
    });

    let body = match &*data.read() {
        None => rsx! { LoadingRows {} },
        Some(Err(err)) => rsx! {
            ListError { error: err.clone(), on_retry: move |_| data.restart() }
        },
        Some(Ok(result)) => {
            let visible = filter_by_text(&result.data, &search.read());
            let (signed, pending): (Vec<Laudo>, Vec<Laudo>) =
                visible.into_iter().partition(Laudo::is_signed);
            let total_pages = result.total_pages;
            let total = result.total;
            rsx! {
                if signed.is_empty() && pending.is_empty() {
                    p { class: "muted", "Nenhum laudo encontrado." }
                }
                if !pending.is_empty() {
                    ListSection { title: "Aguardando assinatura", count: pending.len(),
                        LaudoTable { laudos: pending }
                    }
                }
                if !signed.is_empty() {
                    ListSection { title: "Assinados", count: signed.len(),
                        LaudoTable { laudos: signed }
                    }
                }
                Pagination { page, total_pages, total: Some(total) }
            }
        }
    };

    rsx! {
        div { class: "container",
            PageHeader { title: "Laudos",
                if can_issue {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| {
                            navigator().push(Route::LaudoCreate {});
                        },
                        "Novo laudo"
                    }
                }
            }
            SearchBar {
                Input {
                    value: search.read().clone(),
                    placeholder: "Buscar por caso, vítima, perito...",
                    on_input: move |evt: FormEvent| search.set(evt.value()),
                }
            }
            {body}
        }
    }
}

#[component]
fn LaudoTable(laudos: Vec<Laudo>) -> Element {
    rsx! {
        DataTable { caption: "Laudos",
            DataTableHeader {
                DataTableColumn { "Caso" }
                DataTableColumn { "Vítima" }
                DataTableColumn { "Perito" }
                DataTableColumn { "Evidências" }
                DataTableColumn { "Emitido em" }
                DataTableColumn { "Assinatura" }
            }
            DataTableBody {
                for laudo in laudos {
                    DataTableRow { key: "{laudo.id}",
                        DataTableCell { "{laudo.caso_label()}" }
                        DataTableCell { "{laudo.vitima_label()}" }
                        DataTableCell { "{laudo.perito_label()}" }
                        DataTableCell { "{laudo.evidencias.len()}" }
                        DataTableCell { {format_date(laudo.data_criacao.as_deref())} }
                        DataTableCell {
                            match laudo.assinatura_digital.as_deref().and_then(signature_fingerprint) {
                                Some(fingerprint) => rsx! {
                                    Badge { tone: Tone::Success, "Assinado" }
                                    span { class: "mono", title: "Impressão digital SHA-256", " {fingerprint}" }
                                },
                                None => rsx! {
                                    Badge { tone: Tone::Neutral, "Pendente" }
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}
