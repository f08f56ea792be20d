use api_client::api::cases::create_case;
use api_client::api::users::list_experts;
use dioxus::prelude::*;
use shared_types::{
    generate_reference_code, CaseIntakeForm, CaseStatus, WizardForm, WizardState, CASE_STATUSES,
};
use shared_ui::{
    Card, CardContent, Form, FormError, FormSelect, Input, PageHeader, Stepper,
    Textarea,
};

use crate::auth::use_auth;
use crate::components::{WizardNav, WizardSuccess};
use crate::routes::Route;
use crate::tasks::use_latest_task;

/// Three-step case intake. The reference code is generated at submit time.
#[component]
pub fn CaseCreatePage() -> Element {
    let auth = use_auth();
    let mut form = use_signal(CaseIntakeForm::default);
    let mut wizard = use_signal(WizardState::for_form::<CaseIntakeForm>);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let mut created = use_signal(|| Option::<String>::None);
    let mut submission = use_latest_task();

    let experts = use_resource(move || async move {
        let client = auth.client();
        auth.checked(list_experts(&client).await)
    });

    let handle_submit = move |_: FormEvent| {
        let current = form.read().clone();
        if !wizard.write().submit_or_advance(&current) {
            return;
        }
        let request = match current.to_request(generate_reference_code()) {
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
            match auth.checked(create_case(&client, &request).await) {
                Ok(case) => {
                    tracing::info!(case_id = %case.id, "Case registered");
                    form.set(CaseIntakeForm::default());
                    wizard.write().reset();
                    created.set(Some(case.caso_referencia.unwrap_or(request.caso_referencia)));
                }
                Err(e) => error_msg.set(Some(e.user_message())),
            }
            submitting.set(false);
        });
    };

    let state = *wizard.read();
    let current = form.read().clone();
    let steps: Vec<String> = CaseIntakeForm::STEPS.iter().map(|s| s.to_string()).collect();

    rsx! {
        div { class: "container wizard",
            PageHeader { title: "Novo caso" }

            if let Some(code) = created() {
                WizardSuccess {
                    title: "Caso cadastrado",
                    message: "O caso foi registrado com sucesso.",
                    again_label: "Cadastrar outro caso",
                    on_again: move |_| created.set(None),
                    p { "Código de referência: " strong { class: "mono", "{code}" } }
                    p {
                        Link { to: Route::CaseList {}, "Ver lista de casos" }
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
                                        Input {
                                            label: "Título",
                                            required: true,
                                            value: current.title.clone(),
                                            on_input: move |evt: FormEvent| form.write().title = evt.value(),
                                        }
                                        Textarea {
                                            label: "Descrição",
                                            required: true,
                                            value: current.description.clone(),
                                            on_input: move |evt: FormEvent| form.write().description = evt.value(),
                                        }
                                        FormSelect {
                                            label: "Status",
                                            value: current.status.as_str(),
                                            onchange: move |evt: FormEvent| {
                                                if let Some(status) = CaseStatus::parse(&evt.value()) {
                                                    form.write().status = status;
                                                }
                                            },
                                            for status in CASE_STATUSES.iter() {
                                                option { key: "{status.as_str()}", value: status.as_str(), "{status.as_str()}" }
                                            }
                                        }
                                    },
                                    1 => rsx! {
                                        match &*experts.read() {
                                            Some(Ok(list)) => rsx! {
                                                FormSelect {
                                                    label: "Perito responsável",
                                                    placeholder: "Selecione um perito",
                                                    value: current.responsavel.clone(),
                                                    onchange: move |evt: FormEvent| form.write().responsavel = evt.value(),
                                                    for expert in list.iter() {
                                                        option { key: "{expert.id}", value: expert.id.clone(), "{expert.nome}" }
                                                    }
                                                }
                                            },
                                            Some(Err(e)) => rsx! {
                                                FormError { message: e.user_message() }
                                            },
                                            None => rsx! { p { class: "muted", "Carregando peritos..." } },
                                        }
                                    },
                                    _ => rsx! {
                                        Input {
                                            label: "Cidade",
                                            required: true,
                                            value: current.cidade.clone(),
                                            on_input: move |evt: FormEvent| form.write().cidade = evt.value(),
                                        }
                                        Input {
                                            label: "Estado",
                                            required: true,
                                            placeholder: "UF",
                                            value: current.estado.clone(),
                                            on_input: move |evt: FormEvent| form.write().estado = evt.value(),
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
                                submit_label: "Cadastrar caso",
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
