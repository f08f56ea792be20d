use api_client::api::evidence::{delete_evidence, get_evidence, list_evidence, update_evidence};
use dioxus::prelude::*;
use shared_types::{
    filter_by_text, group_by_key, remove_record, replace_record, BodyCondition, Capability,
    Evidence, EvidenceKind, PageQuery, Sex, UpdateEvidenceRequest, VictimIdentification,
    BODY_CONDITIONS, EVIDENCE_KINDS, SEXES, VICTIM_IDENTIFICATIONS,
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

#[component]
pub fn EvidenceListPage() -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let can_register = use_can(Capability::RegisterEvidence);

    let page = use_signal(|| 1u32);
    let mut search = use_signal(String::new);
    let mut evidence = use_signal(Vec::<Evidence>::new);
    let mut total_pages = use_signal(|| 1u32);
    let mut total = use_signal(|| 0u64);

    let mut editing = use_signal(|| Option::<Evidence>::None);
    let mut edit_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<Evidence>::None);
    let mut deleting = use_signal(|| false);
    let mut save_task = use_latest_task();
    let mut delete_task = use_latest_task();
    let mut load_task = use_latest_task();

    let mut data = use_resource(move || {
        let query = PageQuery::new(*page.read(), PAGE_SIZE);
        async move {
            let client = auth.client();
            auth.checked(list_evidence(&client, &query).await)
        }
    });

    use_effect(move || {
        if let Some(Ok(result)) = &*data.read() {
            evidence.set(result.data.clone());
            total_pages.set(result.total_pages);
            total.set(result.total);
        }
    });

    let handle_save = move |_: FormEvent| {
        let Some(draft) = editing.read().clone() else {
            return;
        };
        if draft.categoria.trim().is_empty() {
            edit_error.set(Some("Informe a categoria.".to_string()));
            return;
        }
        saving.set(true);
        edit_error.set(None);
        save_task.run(async move {
            let client = auth.client();
            let request = UpdateEvidenceRequest::from(&draft);
            match auth.checked(update_evidence(&client, &draft.id, &request).await) {
                Ok(updated) => {
                    replace_record(&mut evidence.write(), updated);
                    editing.set(None);
                    toast.success("Evidência atualizada.".to_string(), ToastOptions::new());
                }
                Err(e) => edit_error.set(Some(e.user_message())),
            }
            saving.set(false);
        });
    };

    // Open with the row, then swap in the server copy unless the user
    // already started typing.
    let open_editor = move |row: Evidence| {
        edit_error.set(None);
        editing.set(Some(row.clone()));
        load_task.run(async move {
            let client = auth.client();
            match auth.checked(get_evidence(&client, &row.id).await) {
                Ok(fresh) => {
                    if editing.peek().as_ref() == Some(&row) {
                        editing.set(Some(fresh));
                    }
                }
                Err(e) => tracing::warn!(evidence_id = %row.id, error = %e, "Could not refresh evidence for editing"),
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
            match auth.checked(delete_evidence(&client, &target.id).await) {
                Ok(()) => {
                    remove_record(&mut evidence.write(), &target.id);
                    total.set(total().saturating_sub(1));
                    toast.success("Evidência excluída.".to_string(), ToastOptions::new());
                }
                Err(e) => toast.error(e.user_message(), ToastOptions::new()),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let loaded = data.read().as_ref().map(|r| r.as_ref().map(|_| ()).map_err(Clone::clone));
    let visible = filter_by_text(&evidence.read(), &search.read());
    let groups = group_by_key(&visible, EVIDENCE_KINDS, |e| e.tipo);

    rsx! {
        div { class: "container",
            PageHeader { title: "Evidências",
                if can_register {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| {
                            navigator().push(Route::EvidenceCreate {});
                        },
                        "Nova evidência"
                    }
                }
            }

            SearchBar {
                Input {
                    value: search.read().clone(),
                    placeholder: "Buscar por categoria, caso, coletor...",
                    on_input: move |evt: FormEvent| search.set(evt.value()),
                }
            }

            match loaded {
                None => rsx! { LoadingRows {} },
                Some(Err(err)) => rsx! {
                    ListError { error: err, on_retry: move |_| data.restart() }
                },
                Some(Ok(())) => rsx! {
                    if groups.is_empty() {
                        p { class: "muted", "Nenhuma evidência encontrada." }
                    }
                    for (kind, items) in groups {
                        ListSection { key: "{kind.as_str()}", title: kind.label().to_string(), count: items.len(),
                            EvidenceTable {
                                items,
                                on_edit: open_editor,
                                on_delete: move |item: Evidence| pending_delete.set(Some(item)),
                            }
                        }
                    }
                    Pagination { page, total_pages: total_pages(), total: Some(total()) }
                },
            }

            Modal {
                open: editing.read().is_some(),
                on_close: move |_| editing.set(None),
                title: "Editar evidência",
                if let Some(draft) = editing.read().clone() {
                    Form { onsubmit: handle_save,
                        div { class: "wizard-fields",
                            Input {
                                label: "Categoria",
                                required: true,
                                value: draft.categoria.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.categoria = evt.value();
                                    }
                                },
                            }
                            FormSelect {
                                label: "Vítima",
                                placeholder: "—",
                                value: draft.vitima.map(|v| v.as_str()).unwrap_or_default(),
                                onchange: move |evt: FormEvent| {
                                    if let (Some(d), Some(v)) = (editing.write().as_mut(), VictimIdentification::parse(&evt.value())) {
                                        d.vitima = Some(v);
                                    }
                                },
                                for v in VICTIM_IDENTIFICATIONS.iter() {
                                    option { key: "{v.as_str()}", value: v.as_str(), "{v.label()}" }
                                }
                            }
                            FormSelect {
                                label: "Sexo",
                                placeholder: "—",
                                value: draft.sexo.map(|v| v.as_str()).unwrap_or_default(),
                                onchange: move |evt: FormEvent| {
                                    if let (Some(d), Some(s)) = (editing.write().as_mut(), Sex::parse(&evt.value())) {
                                        d.sexo = Some(s);
                                    }
                                },
                                for s in SEXES.iter() {
                                    option { key: "{s.as_str()}", value: s.as_str(), "{s.label()}" }
                                }
                            }
                            FormSelect {
                                label: "Estado do corpo",
                                placeholder: "—",
                                value: draft.estado_corpo.map(|v| v.as_str()).unwrap_or_default(),
                                onchange: move |evt: FormEvent| {
                                    if let (Some(d), Some(c)) = (editing.write().as_mut(), BodyCondition::parse(&evt.value())) {
                                        d.estado_corpo = Some(c);
                                    }
                                },
                                for c in BODY_CONDITIONS.iter() {
                                    option { key: "{c.as_str()}", value: c.as_str(), "{c.label()}" }
                                }
                            }
                            Textarea {
                                label: "Lesões",
                                value: draft.lesoes.clone().unwrap_or_default(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.lesoes = Some(evt.value());
                                    }
                                },
                            }
                            if draft.tipo == EvidenceKind::Text {
                                Textarea {
                                    label: "Conteúdo",
                                    rows: 6,
                                    value: draft.conteudo.clone().unwrap_or_default(),
                                    on_input: move |evt: FormEvent| {
                                        if let Some(d) = editing.write().as_mut() {
                                            d.conteudo = Some(evt.value());
                                        }
                                    },
                                }
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
                title: "Excluir evidência?",
                description: pending_delete
                    .read()
                    .as_ref()
                    .map(|e| format!("A evidência \"{}\" do caso {} será excluída.", e.categoria, e.caso_label()))
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
fn EvidenceTable(
    items: Vec<Evidence>,
    on_edit: EventHandler<Evidence>,
    on_delete: EventHandler<Evidence>,
) -> Element {
    let can_edit = use_can(Capability::EditEvidence);
    let can_delete = use_can(Capability::DeleteEvidence);

    rsx! {
        DataTable { caption: "Evidências",
            DataTableHeader {
                DataTableColumn { "Categoria" }
                DataTableColumn { "Caso" }
                DataTableColumn { "Vítima" }
                DataTableColumn { "Coletado por" }
                DataTableColumn { "Enviado em" }
                DataTableColumn { "Conteúdo" }
                DataTableColumn { "" }
            }
            DataTableBody {
                for item in items {
                    DataTableRow { key: "{item.id}",
                        DataTableCell { "{item.categoria}" }
                        DataTableCell { "{item.caso_label()}" }
                        DataTableCell {
                            Badge {
                                tone: if item.is_identified() { Tone::Success } else { Tone::Warning },
                                "{item.vitima_label()}"
                            }
                        }
                        DataTableCell { "{item.coletor_label()}" }
                        DataTableCell { {format_date(item.data_upload.as_deref())} }
                        DataTableCell {
                            match (&item.imagem_url, &item.conteudo) {
                                (Some(url), _) => rsx! {
                                    a { href: "{url}", target: "_blank", rel: "noopener", "Ver imagem" }
                                },
                                (None, Some(text)) => rsx! { span { class: "muted", "{text}" } },
                                (None, None) => rsx! { "—" },
                            }
                        }
                        DataTableActions {
                            if can_edit {
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    onclick: {
                                        let item = item.clone();
                                        move |_| on_edit.call(item.clone())
                                    },
                                    "Editar"
                                }
                            }
                            if can_delete {
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    onclick: {
                                        let item = item.clone();
                                        move |_| on_delete.call(item.clone())
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
