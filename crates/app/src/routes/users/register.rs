use api_client::api::users::register_user;
use dioxus::prelude::*;
use shared_types::{Role, UserRegistrationForm, WizardForm, WizardState, ALL_ROLES};
use shared_ui::{Card, CardContent, Form, FormSelect, Input, PageHeader, Stepper};

use crate::auth::use_auth;
use crate::components::{WizardNav, WizardSuccess};
use crate::routes::Route;
use crate::tasks::use_latest_task;

/// Two-step account creation: personal data, then role and password.
#[component]
pub fn UserRegisterPage() -> Element {
    let auth = use_auth();
    let mut form = use_signal(UserRegistrationForm::default);
    let mut wizard = use_signal(WizardState::for_form::<UserRegistrationForm>);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let mut created = use_signal(|| Option::<String>::None);
    let mut submission = use_latest_task();

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
        submitting.set(true);
        error_msg.set(None);
        submission.run(async move {
            let client = auth.client();
            match auth.checked(register_user(&client, &request).await) {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, perfil = %user.perfil, "User registered");
                    form.set(UserRegistrationForm::default());
                    wizard.write().reset();
                    created.set(Some(user.nome));
                }
                Err(e) => error_msg.set(Some(e.user_message())),
            }
            submitting.set(false);
        });
    };

    let state = *wizard.read();
    let current = form.read().clone();
    let steps: Vec<String> = UserRegistrationForm::STEPS.iter().map(|s| s.to_string()).collect();

    rsx! {
        div { class: "container wizard",
            PageHeader { title: "Novo usuário" }

            if let Some(name) = created() {
                WizardSuccess {
                    title: "Usuário cadastrado",
                    message: "{name} já pode entrar no sistema.",
                    again_label: "Cadastrar outro usuário",
                    on_again: move |_| created.set(None),
                    p {
                        Link { to: Route::UserList {}, "Ver lista de usuários" }
                    }
                }
            } else {
                Card {
                    CardContent {
                        Stepper { steps, current: state.step() }
                        Form { onsubmit: handle_submit,
                            div { class: "wizard-fields",
                                if state.step() == 0 {
                                    Input {
                                        label: "Nome",
                                        required: true,
                                        value: current.nome.clone(),
                                        on_input: move |evt: FormEvent| form.write().nome = evt.value(),
                                    }
                                    Input {
                                        label: "E-mail",
                                        input_type: "email",
                                        required: true,
                                        value: current.email.clone(),
                                        on_input: move |evt: FormEvent| form.write().email = evt.value(),
                                    }
                                    Input {
                                        label: "CPF",
                                        required: true,
                                        placeholder: "000.000.000-00",
                                        value: current.cpf.clone(),
                                        on_input: move |evt: FormEvent| form.write().cpf = evt.value(),
                                    }
                                    Input {
                                        label: "CRO",
                                        placeholder: "Opcional",
                                        value: current.cro.clone(),
                                        on_input: move |evt: FormEvent| form.write().cro = evt.value(),
                                    }
                                } else {
                                    FormSelect {
                                        label: "Perfil",
                                        placeholder: "Selecione o perfil",
                                        value: current.perfil.map(|r| r.as_str()).unwrap_or_default(),
                                        onchange: move |evt: FormEvent| form.write().perfil = Role::parse(&evt.value()),
                                        for role in ALL_ROLES.iter() {
                                            option { key: "{role.as_str()}", value: role.as_str(), "{role.as_str()}" }
                                        }
                                    }
                                    Input {
                                        label: "Senha",
                                        input_type: "password",
                                        required: true,
                                        value: current.senha.clone(),
                                        on_input: move |evt: FormEvent| form.write().senha = evt.value(),
                                    }
                                    Input {
                                        label: "Confirmar senha",
                                        input_type: "password",
                                        required: true,
                                        value: current.confirmacao.clone(),
                                        on_input: move |evt: FormEvent| form.write().confirmacao = evt.value(),
                                    }
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
                                submit_label: "Cadastrar usuário",
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
