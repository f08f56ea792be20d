use dioxus::prelude::*;

/// Pulsing bars shown while a list or chart loads.
#[component]
pub fn LoadingRows(#[props(default = 3)] rows: usize) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "loading-rows", "aria-busy": true, "aria-label": "Carregando",
            for i in 0..rows {
                div { key: "{i}", class: "skeleton" }
            }
        }
    }
}
