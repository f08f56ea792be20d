use api_client::api::cases::list_cases;
use api_client::api::evidence::list_evidence;
use api_client::api::laudos::list_laudos;
use api_client::api::reports::create_report;
use api_client::api::victims::list_victims;
use dioxus::prelude::*;
use shared_types::{
    AppError, Attachment, FeatureFlags, PageQuery, Reference, ReportForm, WizardForm, WizardState,
};
use shared_ui::{
    Card, CardContent, Form, FormError, FormSelect, Input, PageHeader, Stepper,
    Textarea,
};

use crate::auth::use_auth;
use crate::components::{FilePicker, WizardNav, WizardSuccess};
use crate::routes::Route;
use crate::tasks::use_latest_task;

const PICKER_LIMIT: u32 = 100;

fn toggle_id(ids: &mut Vec<String>, id: &str) {
    if let Some(pos) = ids.iter().position(|e| e == id) {
        ids.remove(pos);
    } else {
        ids.push(id.to_string());
    }
}

/// Which id list of the form a checkbox group edits.
#[derive(Clone, Copy, PartialEq)]
enum LinkKind {
    Evidence,
    Victim,
    Laudo,
}

impl LinkKind {
    fn selected(self, form: &ReportForm) -> &[String] {
        match self {
            LinkKind::Evidence => &form.evidencias,
            LinkKind::Victim => &form.vitimas,
            LinkKind::Laudo => &form.laudos,
        }
    }

    fn selected_mut(self, form: &mut ReportForm) -> &mut Vec<String> {
        match self {
            LinkKind::Evidence => &mut form.evidencias,
            LinkKind::Victim => &mut form.vitimas,
            LinkKind::Laudo => &mut form.laudos,
        }
    }
}

/// Report wizard. Evidence, victims and laudos of the chosen case can be
/// linked; an optional audio note rides along when enabled.
#[component]
pub fn ReportCreatePage() -> Element {
    let auth = use_auth();
    let flags: FeatureFlags = use_context();
    let mut form = use_signal(ReportForm::default);
    let mut audio = use_signal(|| Option::<Attachment>::None);
    let mut wizard = use_signal(WizardState::for_form::<ReportForm>);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let mut created = use_signal(|| false);
    let mut submission = use_latest_task();

    let cases = use_resource(move || async move {
        let client = auth.client();
        auth.checked(list_cases(&client, &PageQuery::new(1, PICKER_LIMIT)).await)
            .map(|page| page.data)
    });
    let case_id = use_memo(move || form.read().caso.clone());
    // Everything linkable for the chosen case, as (kind, id, label).
    let linkable = use_resource(move || {
        let case_id = case_id();
        async move {
            if case_id.is_empty() {
                return Ok(Vec::new());
            }
            let client = auth.client();
            let query = PageQuery::new(1, PICKER_LIMIT);
            let evidence = auth.checked(list_evidence(&client, &query).await)?;
            let victims = auth.checked(list_victims(&client, &query).await)?;
            let laudos = auth.checked(list_laudos(&client, &query).await)?;
            let in_case = |caso: Option<&Reference>| {
                caso.is_some_and(|c| c.id() == case_id)
            };

            let mut items = Vec::new();
            for e in evidence.data.iter().filter(|e| in_case(e.caso.as_ref())) {
                items.push((LinkKind::Evidence, e.id.clone(), format!("{} ({})", e.categoria, e.tipo.label())));
            }
            for v in victims.data.iter().filter(|v| in_case(v.caso.as_ref())) {
                items.push((LinkKind::Victim, v.id.clone(), v.display_name().to_string()));
            }
            for l in laudos.data.iter().filter(|l| in_case(l.caso.as_ref())) {
                items.push((LinkKind::Laudo, l.id.clone(), format!("Laudo de {}", l.vitima_label())));
            }
            Ok::<_, AppError>(items)
        }
    });

    use_effect(move || {
        let picked = audio.read().clone();
        form.write().audio = picked;
    });

    let handle_submit = move |_: FormEvent| {
        let current = form.read().clone();
        if !wizard.write().submit_or_advance(&current) {
            return;
        }
        let request = match current.to_request() {
            Ok(request) => request,
            Err(e) => {
                error_msg.set(Some(e.user_message()));
                return;
            }
        };
        let attachment = if flags.audio_reports { current.audio.clone() } else { None };
        submitting.set(true);
        error_msg.set(None);
        submission.run(async move {
            let client = auth.client();
            match auth.checked(create_report(&client, &request, attachment).await) {
                Ok(report) => {
                    tracing::info!(report_id = %report.id, "Report generated");
                    form.set(ReportForm::default());
                    audio.set(None);
                    wizard.write().reset();
                    created.set(true);
                }
                Err(e) => error_msg.set(Some(e.user_message())),
            }
            submitting.set(false);
        });
    };

    let state = *wizard.read();
    let current = form.read().clone();
    let steps: Vec<String> = ReportForm::STEPS.iter().map(|s| s.to_string()).collect();

    rsx! {
        div { class: "container wizard",
            PageHeader { title: "Gerar relatório" }

            if created() {
                WizardSuccess {
                    title: "Relatório gerado",
                    message: "O relatório foi registrado com sucesso.",
                    again_label: "Gerar outro relatório",
                    on_again: move |_| created.set(false),
                    p {
                        Link { to: Route::ReportList {}, "Ver lista de relatórios" }
                    }
                }
            } else {
                Card {
                    CardContent {
                        Stepper { steps, current: state.step() }
                        Form { onsubmit: handle_submit,
                            div { class: "wizard-fields",
                                match state.step() {
                                    0 => rsx! {
                                        match &*cases.read() {
                                            Some(Ok(list)) => rsx! {
                                                FormSelect {
                                                    label: "Caso",
                                                    placeholder: "Selecione o caso",
                                                    value: current.caso.clone(),
                                                    onchange: move |evt: FormEvent| {
                                                        let mut f = form.write();
                                                        f.caso = evt.value();
                                                        f.evidencias.clear();
                                                        f.vitimas.clear();
                                                        f.laudos.clear();
                                                    },
                                                    for case in list.iter() {
                                                        option { key: "{case.id}", value: case.id.clone(), "{case.title}" }
                                                    }
                                                }
                                            },
                                            Some(Err(e)) => rsx! { FormError { message: e.user_message() } },
                                            None => rsx! { p { class: "muted", "Carregando casos..." } },
                                        }
                                        Input {
                                            label: "Título",
                                            required: true,
                                            value: current.titulo.clone(),
                                            on_input: move |evt: FormEvent| form.write().titulo = evt.value(),
                                        }
                                        Textarea {
                                            label: "Objetivo",
                                            required: true,
                                            value: current.objetivo.clone(),
                                            on_input: move |evt: FormEvent| form.write().objetivo = evt.value(),
                                        }
                                    },
                                    1 => rsx! {
                                        Textarea {
                                            label: "Metodologia",
                                            required: true,
                                            value: current.metodologia.clone(),
                                            on_input: move |evt: FormEvent| form.write().metodologia = evt.value(),
                                        }
                                        Textarea {
                                            label: "Materiais",
                                            required: true,
                                            value: current.materiais.clone(),
                                            on_input: move |evt: FormEvent| form.write().materiais = evt.value(),
                                        }
                                        Textarea {
                                            label: "Exames realizados",
                                            required: true,
                                            value: current.exames_realizados.clone(),
                                            on_input: move |evt: FormEvent| form.write().exames_realizados = evt.value(),
                                        }
                                        span { class: "field-label", "Vínculos" }
                                        match &*linkable.read() {
                                            Some(Ok(items)) if items.is_empty() => rsx! {
                                                p { class: "muted", "Nada vinculado a este caso." }
                                            },
                                            Some(Ok(items)) => rsx! {
                                                div { class: "checkbox-list",
                                                    for (kind, id, text) in items.iter().cloned() {
                                                        label { key: "{id}", class: "checkbox-item",
                                                            input {
                                                                r#type: "checkbox",
                                                                checked: kind.selected(&current).contains(&id),
                                                                onchange: {
                                                                    let id = id.clone();
                                                                    move |_| toggle_id(kind.selected_mut(&mut form.write()), &id)
                                                                },
                                                            }
                                                            "{text}"
                                                        }
                                                    }
                                                }
                                            },
                                            Some(Err(e)) => rsx! { FormError { message: e.user_message() } },
                                            None => rsx! { p { class: "muted", "Carregando vínculos..." } },
                                        }
                                    },
                                    _ => rsx! {
                                        Textarea {
                                            label: "Considerações",
                                            required: true,
                                            value: current.consideracoes.clone(),
                                            on_input: move |evt: FormEvent| form.write().consideracoes = evt.value(),
                                        }
                                        Textarea {
                                            label: "Conclusão",
                                            required: true,
                                            rows: 6,
                                            value: current.conclusao.clone(),
                                            on_input: move |evt: FormEvent| form.write().conclusao = evt.value(),
                                        }
                                        if flags.audio_reports {
                                            FilePicker {
                                                label: "Nota em áudio (opcional)",
                                                accept: "audio/*",
                                                file: audio,
                                            }
                                        }
                                    },
                                }
                            }
                            if let Some(err) = error_msg() {
                                p { class: "error-line", role: "alert", "{err}" }
                            }
                            WizardNav {
                                is_first: state.is_first(),
                                is_last: state.is_last(),
                                step_complete: current.step_complete(state.step()),
                                busy: submitting(),
                                submit_label: "Gerar relatório",
                                on_back: move |_| {
                                    wizard.write().back();
                                },
                                on_next: move |_| {
                                    let snapshot = form.read().clone();
                                    wizard.write().next(&snapshot);
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}
