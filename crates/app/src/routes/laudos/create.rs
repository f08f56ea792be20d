use api_client::api::cases::list_cases;
use api_client::api::evidence::list_evidence;
use api_client::api::laudos::create_laudo;
use api_client::api::victims::list_victims;
use dioxus::prelude::*;
use shared_types::{Evidence, LaudoForm, PageQuery, WizardForm, WizardState};
use shared_ui::{
    Card, CardContent, Form, FormError, FormSelect, PageHeader, Stepper, Textarea,
};

use crate::auth::use_auth;
use crate::components::{WizardNav, WizardSuccess};
use crate::routes::Route;
use crate::tasks::use_latest_task;

const PICKER_LIMIT: u32 = 100;

fn evidence_of_case(all: &[Evidence], case_id: &str) -> Vec<Evidence> {
    all.iter()
        .filter(|e| e.caso.as_ref().is_some_and(|c| c.id() == case_id))
        .cloned()
        .collect()
}

/// Laudo wizard: pick the case, victim and evidence, record the
/// examination, then the conclusion. The signed-in user is the examiner.
#[component]
pub fn LaudoCreatePage() -> Element {
    let auth = use_auth();
    let mut form = use_signal(LaudoForm::default);
    let mut wizard = use_signal(WizardState::for_form::<LaudoForm>);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let mut created = use_signal(|| false);
    let mut submission = use_latest_task();

    let cases = use_resource(move || async move {
        let client = auth.client();
        auth.checked(list_cases(&client, &PageQuery::new(1, PICKER_LIMIT)).await)
            .map(|page| page.data)
    });
    let victims = use_resource(move || async move {
        let client = auth.client();
        auth.checked(list_victims(&client, &PageQuery::new(1, PICKER_LIMIT)).await)
            .map(|page| page.data)
    });
    let evidence = use_resource(move || async move {
        let client = auth.client();
        auth.checked(list_evidence(&client, &PageQuery::new(1, PICKER_LIMIT)).await)
            .map(|page| page.data)
    });

    let handle_submit = move |_: FormEvent| {
        let current = form.read().clone();
        if !wizard.write().submit_or_advance(&current) {
            return;
        }
        let Some(perito) = auth.user().map(|u| u.id) else {
            error_msg.set(Some("Sessão expirada. Entre novamente.".to_string()));
            return;
        };
        let request = match current.to_request(&perito) {
            Ok(request) => request,
            Err(e) => {
                error_msg.set(Some(e.user_message()));
                return;
            }
        };
        submitting.set(true);
        error_msg.set(None);
        submission.run(async move {
            let client = auth.client();
            match auth.checked(create_laudo(&client, &request).await) {
                Ok(laudo) => {
                    tracing::info!(laudo_id = %laudo.id, "Laudo issued");
                    form.set(LaudoForm::default());
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
    let steps: Vec<String> = LaudoForm::STEPS.iter().map(|s| s.to_string()).collect();

    rsx! {
        div { class: "container wizard",
            PageHeader { title: "Novo laudo" }

            if created() {
                WizardSuccess {
                    title: "Laudo emitido",
                    message: "O laudo foi registrado e aguarda assinatura.",
                    again_label: "Emitir outro laudo",
                    on_again: move |_| created.set(false),
                    p {
                        Link { to: Route::LaudoList {}, "Ver lista de laudos" }
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
                                                    },
                                                    for case in list.iter() {
                                                        option { key: "{case.id}", value: case.id.clone(), "{case.title}" }
                                                    }
                                                }
                                            },
                                            Some(Err(e)) => rsx! { FormError { message: e.user_message() } },
                                            None => rsx! { p { class: "muted", "Carregando casos..." } },
                                        }
                                        match &*victims.read() {
                                            Some(Ok(list)) => rsx! {
                                                FormSelect {
                                                    label: "Vítima",
                                                    placeholder: "Selecione a vítima",
                                                    value: current.vitima.clone(),
                                                    onchange: move |evt: FormEvent| form.write().vitima = evt.value(),
                                                    for victim in list.iter() {
                                                        option { key: "{victim.id}", value: victim.id.clone(), "{victim.display_name()}" }
                                                    }
                                                }
                                            },
                                            Some(Err(e)) => rsx! { FormError { message: e.user_message() } },
                                            None => rsx! { p { class: "muted", "Carregando vítimas..." } },
                                        }
                                        span { class: "field-label", "Evidências" }
                                        match &*evidence.read() {
                                            Some(Ok(all)) => {
                                                let options = evidence_of_case(all, &current.caso);
                                                rsx! {
                                                    if current.caso.is_empty() {
                                                        p { class: "muted", "Selecione um caso para listar as evidências." }
                                                    } else if options.is_empty() {
                                                        p { class: "muted", "Nenhuma evidência neste caso." }
                                                    }
                                                    div { class: "checkbox-list",
                                                        for item in options {
                                                            label { key: "{item.id}", class: "checkbox-item",
                                                                input {
                                                                    r#type: "checkbox",
                                                                    checked: current.evidencias.contains(&item.id),
                                                                    onchange: {
                                                                        let id = item.id.clone();
                                                                        move |_| form.write().toggle_evidence(&id)
                                                                    },
                                                                }
                                                                "{item.categoria} ({item.tipo.label()})"
                                                            }
                                                        }
                                                    }
                                                }
                                            }
                                            Some(Err(e)) => rsx! { FormError { message: e.user_message() } },
                                            None => rsx! { p { class: "muted", "Carregando evidências..." } },
                                        }
                                    },
                                    1 => rsx! {
                                        Textarea {
                                            label: "Dados ante mortem",
                                            required: true,
                                            value: current.dados_antemortem.clone(),
                                            on_input: move |evt: FormEvent| form.write().dados_antemortem = evt.value(),
                                        }
                                        Textarea {
                                            label: "Dados post mortem",
                                            required: true,
                                            value: current.dados_postmortem.clone(),
                                            on_input: move |evt: FormEvent| form.write().dados_postmortem = evt.value(),
                                        }
                                        Textarea {
                                            label: "Análise das lesões",
                                            required: true,
                                            value: current.analise_lesoes.clone(),
                                            on_input: move |evt: FormEvent| form.write().analise_lesoes = evt.value(),
                                        }
                                    },
                                    _ => rsx! {
                                        Textarea {
                                            label: "Conclusão",
                                            required: true,
                                            rows: 6,
                                            value: current.conclusao.clone(),
                                            on_input: move |evt: FormEvent| form.write().conclusao = evt.value(),
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
                                submit_label: "Emitir laudo",
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
