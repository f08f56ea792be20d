use api_client::api::victims::list_victims;
use dioxus::prelude::*;
use shared_types::{
    filter_by_text, group_by_key, PageQuery, Victim, VictimIdentification, VICTIM_IDENTIFICATIONS,
};
use shared_ui::{
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableHeader, DataTableRow, Input,
    LoadingRows, PageHeader, Pagination, SearchBar,
};

use crate::auth::use_auth;
use crate::components::{ListError, ListSection};
use crate::format_helpers::format_date;

const PAGE_SIZE: u32 = 20;

/// Read-only victim registry, split into identified and unidentified.
#[component]
pub fn VictimListPage() -> Element {
    let auth = use_auth();
    let page = use_signal(|| 1u32);
    let mut search = use_signal(String::new);

    let mut data = use_resource(move || {
        let query = PageQuery::new(*page.read(), PAGE_SIZE);
        async move {
            let client = auth.client();
            auth.checked(list_victims(&client, &query).await)
        }
    });

    let body = match &*data.read() {
        None => rsx! { LoadingRows {} },
        Some(Err(err)) => rsx! {
            ListError { error: err.clone(), on_retry: move |_| data.restart() }
        },
        Some(Ok(result)) => {
            let visible = filter_by_text(&result.data, &search.read());
            let groups = group_by_key(&visible, VICTIM_IDENTIFICATIONS, Victim::identification);
            let total_pages = result.total_pages;
            let total = result.total;
            rsx! {
                if groups.is_empty() {
                    p { class: "muted", "Nenhuma vítima encontrada." }
                }
                for (identification, victims) in groups {
                    ListSection {
                        key: "{identification.as_str()}",
                        title: identification.label().to_string(),
                        count: victims.len(),
                        VictimTable { victims, identification }
                    }
                }
                Pagination { page, total_pages, total: Some(total) }
            }
        }
    };

    rsx! {
        div { class: "container",
            PageHeader { title: "Vítimas" }
            SearchBar {
                Input {
                    value: search.read().clone(),
                    placeholder: "Buscar por nome, cidade, caso...",
                    on_input: move |evt: FormEvent| search.set(evt.value()),
                }
            }
            {body}
        }
    }
}

#[component]
fn VictimTable(victims: Vec<Victim>, identification: VictimIdentification) -> Element {
    let identified = identification == VictimIdentification::Identificada;
    rsx! {
        DataTable { caption: "Vítimas",
            DataTableHeader {
                DataTableColumn { "Nome" }
                if identified {
                    DataTableColumn { "Nascimento" }
                } else {
                    DataTableColumn { "Idade aprox." }
                }
                DataTableColumn { "Sexo" }
                DataTableColumn { "Estado do corpo" }
                DataTableColumn { "Cidade" }
                DataTableColumn { "Caso" }
            }
            DataTableBody {
                for victim in victims {
                    DataTableRow { key: "{victim.id}",
                        DataTableCell { "{victim.display_name()}" }
                        if identified {
                            DataTableCell { {format_date(victim.data_nascimento.as_deref())} }
                        } else {
                            DataTableCell {
                                {victim.idade_aproximada.map(|age| format!("{age} anos")).unwrap_or_else(|| "—".to_string())}
                            }
                        }
                        DataTableCell { "{victim.sexo.label()}" }
                        DataTableCell { "{victim.estado_corpo.label()}" }
                        DataTableCell { {victim.cidade.clone().unwrap_or_else(|| "—".to_string())} }
                        DataTableCell { "{victim.caso_label()}" }
                    }
                }
            }
        }
    }
}
