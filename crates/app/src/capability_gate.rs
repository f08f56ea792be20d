use dioxus::prelude::*;
use shared_types::Capability;
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};

use crate::auth::use_can;

/// Render `children` only when the signed-in user holds `required`.
#[component]
pub fn CapabilityGate(
    required: Capability,
    #[props(default)] fallback: Option<Element>,
    children: Element,
) -> Element {
    if use_can(required) {
        return rsx! { {children} };
    }
    match fallback {
        Some(fallback) => rsx! { {fallback} },
        None => rsx! {},
    }
}

/// Page-level gate: shows an "Acesso negado" card instead of the page.
#[component]
pub fn RequireCapability(required: Capability, children: Element) -> Element {
    rsx! {
        CapabilityGate {
            required,
            fallback: rsx! { AccessDenied {} },
            {children}
        }
    }
}

#[component]
fn AccessDenied() -> Element {
    rsx! {
        div { class: "container",
            Card { class: "access-denied",
                CardHeader {
                    CardTitle { "Acesso negado" }
                    CardDescription { "Seu perfil não tem permissão para acessar esta página." }
                }
                CardContent {
                    Link { to: crate::routes::Route::Dashboard {}, "Voltar ao painel" }
                }
            }
        }
    }
}
