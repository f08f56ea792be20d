use dioxus::prelude::*;
use shared_ui::{Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

/// Back / next / submit row of a wizard. "Próximo" is disabled until the
/// current step is complete; the last step shows the submit button instead.
#[component]
pub fn WizardNav(
    is_first: bool,
    is_last: bool,
    step_complete: bool,
    busy: bool,
    submit_label: String,
    on_back: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "wizard-actions",
            Button {
                variant: ButtonVariant::Outline,
                disabled: is_first || busy,
                onclick: move |_| on_back.call(()),
                "Voltar"
            }
            if is_last {
                Button {
                    variant: ButtonVariant::Primary,
                    submit: true,
                    disabled: !step_complete,
                    busy: busy,
                    if busy { "Enviando..." } else { "{submit_label}" }
                }
            } else {
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: !step_complete,
                    onclick: move |_| on_next.call(()),
                    "Próximo"
                }
            }
        }
    }
}

/// Confirmation card shown after a wizard posts successfully.
#[component]
pub fn WizardSuccess(
    title: String,
    message: String,
    again_label: String,
    on_again: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        Card { class: "wizard-success",
            CardHeader {
                CardTitle { "{title}" }
                CardDescription { "{message}" }
            }
            CardContent {
                {children}
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| on_again.call(()),
                    "{again_label}"
                }
            }
        }
    }
}
