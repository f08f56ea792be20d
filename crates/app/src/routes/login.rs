use dioxus::prelude::*;
use shared_types::LoginForm;
use shared_ui::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle,
    Form, Input,
};

use crate::auth::use_auth;
use crate::routes::Route;
use crate::tasks::use_latest_task;

/// Login page. "Entrar" stays disabled until both fields are filled.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let mut form = use_signal(LoginForm::default);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let mut submission = use_latest_task();

    if auth.is_authenticated() {
        navigator().push(Route::Dashboard {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let current = form.read().clone();
        if !current.can_submit() || loading() {
            return;
        }
        loading.set(true);
        error_msg.set(None);

        submission.run(async move {
            match auth.login(current.email, current.senha).await {
                Ok(_) => {
                    form.set(LoginForm::default());
                    navigator().push(Route::Dashboard {});
                }
                Err(e) => error_msg.set(Some(e.user_message())),
            }
            loading.set(false);
        });
    };

    let can_submit = form.read().can_submit();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader {
                    div { class: "auth-brand", "ODX Perícias" }
                    CardTitle { "Entrar" }
                    CardDescription { "Informe seu e-mail e senha para acessar o sistema." }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", role: "alert", "{err}" }
                    }

                    Form { onsubmit: handle_login,
                        div { class: "auth-field",
                            Input {
                                label: "E-mail",
                                input_type: "email",
                                placeholder: "nome@exemplo.com",
                                value: form.read().email.clone(),
                                on_input: move |evt: FormEvent| form.write().email = evt.value(),
                            }
                        }
                        div { class: "auth-field",
                            Input {
                                label: "Senha",
                                input_type: "password",
                                value: form.read().senha.clone(),
                                on_input: move |evt: FormEvent| form.write().senha = evt.value(),
                            }
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            submit: true,
                            disabled: !can_submit,
                            busy: loading(),
                            class: "auth-submit",
                            if loading() { "Entrando..." } else { "Entrar" }
                        }
                    }
                }

                CardFooter {
                    p { class: "auth-footer-note",
                        "Acesso restrito a peritos e assistentes cadastrados."
                    }
                }
            }
        }
    }
}
