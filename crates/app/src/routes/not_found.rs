use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};

use crate::auth::use_auth;
use crate::routes::Route;

/// Unknown path. Signed-in users are pointed back to the dashboard, anyone
/// else to the login page.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let auth = use_auth();
    let missing = format!("/{}", route.join("/"));
    let (target, action) = if auth.is_authenticated() {
        (Route::Dashboard {}, "Ir para o painel")
    } else {
        (Route::Login {}, "Ir para o login")
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        div { class: "not-found-page",
            Card { class: "not-found-card",
                CardHeader {
                    span { class: "not-found-code", "404" }
                    CardTitle { "Página não encontrada" }
                    CardDescription { "Nada corresponde a " code { "{missing}" } "." }
                }
                CardContent {
                    Link { to: target, class: "not-found-link", "{action}" }
                }
            }
        }
    }
}
