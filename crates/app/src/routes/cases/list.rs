use api_client::api::cases::{delete_case, get_case, list_cases, update_case};
use dioxus::prelude::*;
use shared_types::{
    clamp_page, filter_by_text, group_by_status, remove_record, replace_record, Capability, Case, CaseStatus,
    PageQuery, UpdateCaseRequest, CASE_STATUSES,
};
use shared_ui::{
    use_toast, Badge, Tone, Button, ButtonVariant, ConfirmDialog, DataTable,
    DataTableActions, DataTableBody, DataTableCell, DataTableColumn, DataTableHeader, DataTableRow,
    Form, FormError, FormSelect, Input, LoadingRows, Modal, ModalFooter, PageHeader,
    Pagination, SearchBar, Textarea, ToastOptions,
};

use crate::auth::{use_auth, use_can};
use crate::components::{ListError, ListSection};
use crate::format_helpers::format_date;
use crate::routes::Route;
use crate::tasks::use_latest_task;

const PAGE_SIZE: u32 = 20;

fn status_tone(status: CaseStatus) -> Tone {
    match status {
        CaseStatus::EmAndamento => Tone::Warning,
        CaseStatus::Finalizado => Tone::Success,
        CaseStatus::Arquivado => Tone::Neutral,
    }
}

#[component]
pub fn CaseListPage() -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let can_register = use_can(Capability::RegisterCase);

    let mut page = use_signal(|| 1u32);
    let mut status_filter = use_signal(String::new);
    let mut search = use_signal(String::new);

    let mut cases = use_signal(Vec::<Case>::new);
    let mut total_pages = use_signal(|| 1u32);
    let mut total = use_signal(|| 0u64);

    let mut editing = use_signal(|| Option::<Case>::None);
    let mut edit_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<Case>::None);
    let mut deleting = use_signal(|| false);
    let mut save_task = use_latest_task();
    let mut delete_task = use_latest_task();
    let mut load_task = use_latest_task();

    let mut data = use_resource(move || {
        let query = PageQuery::new(*page.read(), PAGE_SIZE).with_status(status_filter.read().clone());
        async move {
            let client = auth.client();
            auth.checked(list_cases(&client, &query).await)
        }
    });

    use_effect(move || {
        if let Some(Ok(result)) = &*data.read() {
            cases.set(result.data.clone());
            total_pages.set(result.total_pages);
            total.set(result.total);
            let current = *page.peek();
            let valid = clamp_page(current, result.total_pages);
            if valid != current {
                page.set(valid);
            }
        }
    });

    let handle_save = move |_: FormEvent| {
        let Some(draft) = editing.read().clone() else {
            return;
        };
        if draft.title.trim().is_empty() {
            edit_error.set(Some("Informe o título do caso.".to_string()));
            return;
        }
        saving.set(true);
        edit_error.set(None);
        save_task.run(async move {
            let client = auth.client();
            let request = UpdateCaseRequest::from(&draft);
            match auth.checked(update_case(&client, &draft.id, &request).await) {
                Ok(updated) => {
                    replace_record(&mut cases.write(), updated);
                    editing.set(None);
                    toast.success("Caso atualizado.".to_string(), ToastOptions::new());
                }
                Err(e) => edit_error.set(Some(e.user_message())),
            }
            saving.set(false);
        });
    };

    // Open with the row, then swap in the server copy unless the user
    // already started typing.
    let open_editor = move |row: Case| {
        edit_error.set(None);
        editing.set(Some(row.clone()));
        load_task.run(async move {
            let client = auth.client();
            match auth.checked(get_case(&client, &row.id).await) {
                Ok(fresh) => {
                    if editing.peek().as_ref() == Some(&row) {
                        editing.set(Some(fresh));
                    }
                }
                Err(e) => tracing::warn!(case_id = %row.id, error = %e, "Could not refresh case for editing"),
            }
        });
    };

    let handle_delete = move |_| {
        let Some(target) = pending_delete.read().clone() else {
            return;
        };
        deleting.set(true);
        delete_task.run(async move {
            let client = auth.client();
            match auth.checked(delete_case(&client, &target.id).await) {
                Ok(()) => {
                    remove_record(&mut cases.write(), &target.id);
                    total.set(total().saturating_sub(1));
                    toast.success("Caso excluído.".to_string(), ToastOptions::new());
                }
                Err(e) => toast.error(e.user_message(), ToastOptions::new()),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let loaded = data.read().as_ref().map(|r| r.as_ref().map(|_| ()).map_err(Clone::clone));
    let visible = filter_by_text(&cases.read(), &search.read());
    let groups = group_by_status(&visible);

    rsx! {
        div { class: "container",
            PageHeader { title: "Casos",
                if can_register {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| {
                            navigator().push(Route::CaseCreate {});
                        },
                        "Novo caso"
                    }
                }
            }

            SearchBar {
                Input {
                    value: search.read().clone(),
                    placeholder: "Buscar por título, referência, cidade...",
                    on_input: move |evt: FormEvent| search.set(evt.value()),
                }
                FormSelect {
                    value: status_filter.read().clone(),
                    onchange: move |evt: FormEvent| {
                        status_filter.set(evt.value());
                        page.set(1);
                    },
                    option { value: "", "Todos os status" }
                    for status in CASE_STATUSES.iter() {
                        option { key: "{status.as_str()}", value: status.as_str(), "{status.as_str()}" }
                    }
                }
            }

            match loaded {
                None => rsx! { LoadingRows {} },
                Some(Err(err)) => rsx! {
                    ListError { error: err, on_retry: move |_| data.restart() }
                },
                Some(Ok(())) => rsx! {
                    if groups.is_empty() {
                        p { class: "muted", "Nenhum caso encontrado." }
                    }
                    for (status, items) in groups {
                        ListSection { key: "{status.as_str()}", title: status.as_str().to_string(), count: items.len(),
                            CaseTable {
                                cases: items,
                                on_edit: open_editor,
                                on_delete: move |case: Case| pending_delete.set(Some(case)),
                            }
                        }
                    }
                    Pagination { page, total_pages: total_pages(), total: Some(total()) }
                },
            }

            Modal {
                open: editing.read().is_some(),
                on_close: move |_| editing.set(None),
                title: "Editar caso",
                if let Some(draft) = editing.read().clone() {
                    Form { onsubmit: handle_save,
                        div { class: "wizard-fields",
                            Input {
                                label: "Título",
                                required: true,
                                value: draft.title.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.title = evt.value();
                                    }
                                },
                            }
                            Textarea {
                                label: "Descrição",
                                value: draft.description.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.description = evt.value();
                                    }
                                },
                            }
                            FormSelect {
                                label: "Status",
                                value: draft.status.as_str(),
                                onchange: move |evt: FormEvent| {
                                    if let (Some(d), Some(status)) = (editing.write().as_mut(), CaseStatus::parse(&evt.value())) {
                                        d.status = status;
                                    }
                                },
                                for status in CASE_STATUSES.iter() {
                                    option { key: "{status.as_str()}", value: status.as_str(), "{status.as_str()}" }
                                }
                            }
                            Input {
                                label: "Cidade",
                                value: draft.cidade.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.cidade = evt.value();
                                    }
                                },
                            }
                            Input {
                                label: "Estado",
                                value: draft.estado.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.estado = evt.value();
                                    }
                                },
                            }
                        }
                        if let Some(err) = edit_error() {
                            FormError { message: err }
                        }
                        ModalFooter {
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: move |_| editing.set(None),
                                "Cancelar"
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                submit: true,
                                busy: saving(),
                                if saving() { "Salvando..." } else { "Salvar" }
                            }
                        }
                    }
                }
            }

            ConfirmDialog {
                open: pending_delete.read().is_some(),
                title: "Excluir caso?",
                description: pending_delete
                    .read()
                    .as_ref()
                    .map(|c| format!("O caso \"{}\" será excluído permanentemente.", c.title))
                    .unwrap_or_default(),
                busy: deleting(),
                on_confirm: handle_delete,
                on_cancel: move |_| {
                    if !deleting() {
                        pending_delete.set(None);
                    }
                },
            }
        }
    }
}

#[component]
fn CaseTable(cases: Vec<Case>, on_edit: EventHandler<Case>, on_delete: EventHandler<Case>) -> Element {
    let can_edit = use_can(Capability::EditCase);
    let can_delete = use_can(Capability::DeleteCase);

    rsx! {
        DataTable { caption: "Casos",
            DataTableHeader {
                DataTableColumn { "Referência" }
                DataTableColumn { "Título" }
                DataTableColumn { "Responsável" }
                DataTableColumn { "Local" }
                DataTableColumn { "Status" }
                DataTableColumn { "Criado em" }
                DataTableColumn { "" }
            }
            DataTableBody {
                for case in cases {
                    DataTableRow { key: "{case.id}",
                        DataTableCell {
                            span { class: "mono", {case.caso_referencia.clone().unwrap_or_else(|| "—".to_string())} }
                        }
                        DataTableCell { "{case.title}" }
                        DataTableCell { "{case.responsavel_label()}" }
                        DataTableCell { "{case.location()}" }
                        DataTableCell {
                            Badge { tone: status_tone(case.status), "{case.status}" }
                        }
                        DataTableCell { {format_date(case.data_criacao.as_deref())} }
                        DataTableActions {
                            if can_edit {
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    onclick: {
                                        let case = case.clone();
                                        move |_| on_edit.call(case.clone())
                                    },
                                    "Editar"
                                }
                            }
                            if can_delete {
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    onclick: {
                                        let case = case.clone();
                                        move |_| on_delete.call(case.clone())
                                    },
                                    "Excluir"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
