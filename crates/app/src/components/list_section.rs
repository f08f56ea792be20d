use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::{Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

use crate::format_helpers::count_label;

/// One group of a grouped list, e.g. all "Em andamento" cases.
#[component]
pub fn ListSection(title: String, count: usize, children: Element) -> Element {
    let count = count_label(count, "registro", "registros");
    rsx! {
        section { class: "list-section",
            h2 { class: "list-section-title",
                "{title}"
                span { class: "list-section-count", "({count})" }
            }
            {children}
        }
    }
}

/// Error card shown when a list fails to load.
#[component]
pub fn ListError(error: AppError, on_retry: EventHandler<()>) -> Element {
    rsx! {
        Card {
            CardHeader {
                CardTitle { "Erro" }
                CardDescription { "Não foi possível carregar os dados." }
            }
            CardContent {
                p { class: "error-line", "{error.user_message()}" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| on_retry.call(()),
                    "Tentar novamente"
                }
            }
        }
    }
}
