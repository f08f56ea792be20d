use api_client::api::reports::{delete_report, list_reports, sign_report, update_report};
use dioxus::prelude::*;
use shared_types::{
    filter_by_text, remove_record, replace_record, AppError, Capability, FeatureFlags, PageQuery,
    Report, UpdateReportRequest,
};
use shared_ui::{
    use_toast, Badge, Tone, Button, ButtonVariant, ConfirmDialog, DataTable,
    DataTableActions, DataTableBody, DataTableCell, DataTableColumn, DataTableHeader, DataTableRow,
    Form, FormError, Input, LoadingRows, Modal, ModalFooter, PageHeader, Pagination, SearchBar,
    Textarea, ToastOptions,
};

use crate::auth::{use_auth, use_can};
use crate::components::{ListError, ListSection};
use crate::format_helpers::format_date;
use crate::routes::Route;
use crate::tasks::use_latest_task;

const PAGE_SIZE: u32 = 20;

#[component]
pub fn ReportListPage() -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let flags: FeatureFlags = use_context();
    let can_generate = use_can(Capability::GenerateReport);
    let can_sign = use_can(Capability::SignReport) && flags.report_signing;

    let page = use_signal(|| 1u32);
    let mut search = use_signal(String::new);
    let mut reports = use_signal(Vec::<Report>::new);
    let mut total_pages = use_signal(|| 1u32);
    let mut total = use_signal(|| 0u64);

    let mut editing = use_signal(|| Option::<Report>::None);
    let mut edit_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);
    let mut signing = use_signal(|| Option::<String>::None);
    let mut pending_delete = use_signal(|| Option::<Report>::None);
    let mut deleting = use_signal(|| false);
    let mut save_task = use_latest_task();
    let mut sign_task = use_latest_task();
    let mut delete_task = use_latest_task();

    let mut data = use_resource(move || {
        let query = PageQuery::new(*page.read(), PAGE_SIZE);
        async move {
            let client = auth.client();
            auth.checked(list_reports(&client, &query).await)
        }
    });

    use_effect(move || {
        if let Some(Ok(result)) = &*data.read() {
            reports.set(result.data.clone());
            total_pages.set(result.total_pages);
            total.set(result.total);
        }
    });

    let handle_save = move |_: FormEvent| {
        let Some(draft) = editing.read().clone() else {
            return;
        };
        let request = UpdateReportRequest::from(&draft);
        let missing = request.missing_fields();
        if !missing.is_empty() {
            edit_error.set(Some(AppError::missing_fields(&missing).user_message()));
            return;
        }
        saving.set(true);
        edit_error.set(None);
        save_task.run(async move {
            let client = auth.client();
            match auth.checked(update_report(&client, &draft.id, &request).await) {
                Ok(updated) => {
                    replace_record(&mut reports.write(), updated);
                    editing.set(None);
                    toast.success("Relatório atualizado.".to_string(), ToastOptions::new());
                }
                Err(e) => edit_error.set(Some(e.user_message())),
            }
            saving.set(false);
        });
    };

    let handle_sign = move |report: Report| {
        if signing.read().is_some() {
            return;
        }
        signing.set(Some(report.id.clone()));
        sign_task.run(async move {
            let client = auth.client();
            match auth.checked(sign_report(&client, &report.id).await) {
                Ok(signed) => {
                    tracing::info!(report_id = %signed.id, "Report signed");
                    replace_record(&mut reports.write(), signed);
                    toast.success("Relatório assinado.".to_string(), ToastOptions::new());
                }
                Err(e) => toast.error(e.user_message(), ToastOptions::new()),
            }
            signing.set(None);
        });
    };

    let handle_delete = move |_| {
        let Some(target) = pending_delete.read().clone() else {
            return;
        };
        deleting.set(true);
        delete_task.run(async move {
            let client = auth.client();
            match auth.checked(delete_report(&client, &target.id).await) {
                Ok(()) => {
                    remove_record(&mut reports.write(), &target.id);
                    total.set(total().saturating_sub(1));
                    toast.success("Relatório excluído.".to_string(), ToastOptions::new());
                }
                Err(e) => toast.error(e.user_message(), ToastOptions::new()),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let loaded = data.read().as_ref().map(|r| r.as_ref().map(|_| ()).map_err(Clone::clone));
    let visible = filter_by_text(&reports.read(), &search.read());
    let (signed, unsigned): (Vec<Report>, Vec<Report>) =
        visible.into_iter().partition(|r| r.assinado);
    let signing_id = signing();

    rsx! {
        div { class: "container",
            PageHeader { title: "Relatórios",
                if can_generate {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| {
                            navigator().push(Route::ReportCreate {});
                        },
                        "Gerar relatório"
                    }
                }
            }

            SearchBar {
                Input {
                    value: search.read().clone(),
                    placeholder: "Buscar por título, caso, perito...",
                    on_input: move |evt: FormEvent| search.set(evt.value()),
                }
            }

            match loaded {
                None => rsx! { LoadingRows {} },
                Some(Err(err)) => rsx! {
                    ListError { error: err, on_retry: move |_| data.restart() }
                },
                Some(Ok(())) => rsx! {
                    if signed.is_empty() && unsigned.is_empty() {
                        p { class: "muted", "Nenhum relatório encontrado." }
                    }
                    if !unsigned.is_empty() {
                        ListSection { title: "Não assinados", count: unsigned.len(),
                            ReportTable {
                                reports: unsigned,
                                can_sign,
                                signing_id: signing_id.clone(),
                                on_edit: move |report: Report| {
                                    edit_error.set(None);
                                    editing.set(Some(report));
                                },
                                on_sign: handle_sign,
                                on_delete: move |report: Report| pending_delete.set(Some(report)),
                            }
                        }
                    }
                    if !signed.is_empty() {
                        ListSection { title: "Assinados", count: signed.len(),
                            ReportTable {
                                reports: signed,
                                can_sign: false,
                                signing_id: None,
                                on_edit: move |report: Report| {
                                    edit_error.set(None);
                                    editing.set(Some(report));
                                },
                                on_sign: handle_sign,
                                on_delete: move |report: Report| pending_delete.set(Some(report)),
                            }
                        }
                    }
                    Pagination { page, total_pages: total_pages(), total: Some(total()) }
                },
            }

            Modal {
                open: editing.read().is_some(),
                on_close: move |_| editing.set(None),
                title: "Editar relatório",
                if let Some(draft) = editing.read().clone() {
                    Form { onsubmit: handle_save,
                        div { class: "wizard-fields",
                            Input {
                                label: "Título",
                                required: true,
                                value: draft.titulo.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.titulo = evt.value();
                                    }
                                },
                            }
                            Textarea {
                                label: "Objetivo",
                                value: draft.objetivo.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.objetivo = evt.value();
                                    }
                                },
                            }
                            Textarea {
                                label: "Metodologia",
                                value: draft.metodologia.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.metodologia = evt.value();
                                    }
                                },
                            }
                            Textarea {
                                label: "Materiais",
                                value: draft.materiais.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.materiais = evt.value();
                                    }
                                },
                            }
                            Textarea {
                                label: "Exames realizados",
                                value: draft.exames_realizados.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.exames_realizados = evt.value();
                                    }
                                },
                            }
                            Textarea {
                                label: "Considerações",
                                value: draft.consideracoes.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.consideracoes = evt.value();
                                    }
                                },
                            }
                            Textarea {
                                label: "Conclusão",
                                value: draft.conclusao.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.conclusao = evt.value();
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
                title: "Excluir relatório?",
                description: pending_delete
                    .read()
                    .as_ref()
                    .map(|r| format!("O relatório \"{}\" será excluído permanentemente.", r.titulo))
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
fn ReportTable(
    reports: Vec<Report>,
    can_sign: bool,
    signing_id: Option<String>,
    on_edit: EventHandler<Report>,
    on_sign: EventHandler<Report>,
    on_delete: EventHandler<Report>,
) -> Element {
    let can_edit = use_can(Capability::EditReport);
    let can_delete = use_can(Capability::DeleteReport);

    rsx! {
        DataTable { caption: "Relatórios",
            DataTableHeader {
                DataTableColumn { "Título" }
                DataTableColumn { "Caso" }
                DataTableColumn { "Perito" }
                DataTableColumn { "Criado em" }
                DataTableColumn { "Áudio" }
                DataTableColumn { "Status" }
                DataTableColumn { "" }
            }
            DataTableBody {
                for report in reports {
                    DataTableRow { key: "{report.id}",
                        DataTableCell { "{report.titulo}" }
                        DataTableCell { "{report.caso_label()}" }
                        DataTableCell { "{report.perito_label()}" }
                        DataTableCell { {format_date(report.data_criacao.as_deref())} }
                        DataTableCell {
                            if let Some(url) = report.audio_url.clone() {
                                audio { controls: true, preload: "none", src: "{url}" }
                            } else {
                                "—"
                            }
                        }
                        DataTableCell {
                            if report.assinado {
                                Badge { tone: Tone::Success, "Assinado" }
                            } else {
                                Badge { tone: Tone::Neutral, "Pendente" }
                            }
                        }
                        DataTableActions {
                            if can_edit && !report.assinado {
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    onclick: {
                                        let report = report.clone();
                                        move |_| on_edit.call(report.clone())
                                    },
                                    "Editar"
                                }
                            }
                            if can_sign && !report.assinado {
                                Button {
                                    variant: ButtonVariant::Outline,
                                    disabled: signing_id.is_some(),
                                    onclick: {
                                        let report = report.clone();
                                        move |_| on_sign.call(report.clone())
                                    },
                                    if signing_id.as_deref() == Some(report.id.as_str()) { "Assinando..." } else { "Assinar" }
                                }
                            }
                            if can_delete {
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    onclick: {
                                        let report = report.clone();
                                        move |_| on_delete.call(report.clone())
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
