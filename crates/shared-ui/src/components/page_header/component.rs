use dioxus::prelude::*;

/// Page title with its actions aligned to the right.
#[component]
pub fn PageHeader(title: String, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        header { class: "page-header",
            h1 { class: "page-title", "{title}" }
            div { class: "page-actions", {children} }
        }
    }
}

/// Filter row under a page header.
#[component]
pub fn SearchBar(children: Element) -> Element {
    rsx! {
        div { class: "search-bar", role: "search", {children} }
    }
}
