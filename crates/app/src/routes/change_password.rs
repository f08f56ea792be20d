use api_client::api::users::change_password;
use dioxus::prelude::*;
use shared_types::{PasswordChangeForm, WizardForm, MIN_PASSWORD_LEN};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    Form, Input, PageHeader, ToastOptions,
};

use crate::auth::use_auth;
use crate::tasks::use_latest_task;

#[component]
pub fn ChangePasswordPage() -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let mut form = use_signal(PasswordChangeForm::default);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let mut submission = use_latest_task();

    let handle_submit = move |_: FormEvent| {
        let request = match form.read().to_request() {
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
            match auth.checked(change_password(&client, &request).await) {
                Ok(()) => {
                    tracing::info!("Password changed");
                    form.set(PasswordChangeForm::default());
                    toast.success("Senha alterada com sucesso.".to_string(), ToastOptions::new());
                }
                Err(e) => error_msg.set(Some(e.user_message())),
            }
            submitting.set(false);
        });
    };

    let current = form.read().clone();
    let ready = current.is_complete();

    rsx! {
        div { class: "container wizard",
            PageHeader { title: "Alterar senha" }
            Card {
                CardHeader {
                    CardTitle { "Nova senha" }
                    CardDescription { "A nova senha deve ter pelo menos {MIN_PASSWORD_LEN} caracteres." }
                }
                CardContent {
                    Form { onsubmit: handle_submit,
                        div { class: "wizard-fields",
                            Input {
                                label: "Senha atual",
                                input_type: "password",
                                required: true,
                                value: current.senha_atual.clone(),
                                on_input: move |evt: FormEvent| form.write().senha_atual = evt.value(),
                            }
                            Input {
                                label: "Nova senha",
                                input_type: "password",
                                required: true,
                                value: current.nova_senha.clone(),
                                on_input: move |evt: FormEvent| form.write().nova_senha = evt.value(),
                            }
                            Input {
                                label: "Confirmar nova senha",
                                input_type: "password",
                                required: true,
                                value: current.confirmacao.clone(),
                                on_input: move |evt: FormEvent| form.write().confirmacao = evt.value(),
                            }
                        }
                        if let Some(err) = error_msg() {
                            p { class: "error-line", role: "alert", "{err}" }
                        }
                        div { class: "wizard-actions",
                            Button {
                                variant: ButtonVariant::Primary,
                                submit: true,
                                disabled: !ready,
                                busy: submitting(),
                                if submitting() { "Salvando..." } else { "Alterar senha" }
                            }
                        }
                    }
                }
            }
        }
    }
}
