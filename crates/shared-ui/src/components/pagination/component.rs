use dioxus::prelude::*;

use crate::components::button::{Button, ButtonVariant};

/// Page-based "Anterior / Próxima" controls. `page` is one-based.
#[component]
pub fn Pagination(mut page: Signal<u32>, total_pages: u32, #[props(default)] total: Option<u64>) -> Element {
    let current = (*page.read()).max(1);
    let last = total_pages.max(1);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "pagination",
            Button {
                variant: ButtonVariant::Outline,
                disabled: current <= 1,
                onclick: move |_| {
                    let value = *page.read();
                    page.set(value.saturating_sub(1).max(1));
                },
                "Anterior"
            }
            PaginationInfo { current, last, total }
            Button {
                variant: ButtonVariant::Outline,
                disabled: current >= last,
                onclick: move |_| {
                    let value = *page.read();
                    page.set((value + 1).min(last));
                },
                "Próxima"
            }
        }
    }
}

#[component]
pub fn PaginationInfo(current: u32, last: u32, total: Option<u64>) -> Element {
    rsx! {
        span { class: "pagination-info",
            "Página {current} de {last}"
            if let Some(total) = total {
                " ({total} registros)"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_renders_in_portuguese() {
        let html = dioxus_ssr::render_element(rsx! {
            PaginationInfo { current: 2, last: 5, total: Some(47) }
        });
        assert!(html.contains("Página 2 de 5"));
        assert!(html.contains("47 registros"));
    }
}
