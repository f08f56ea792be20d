use dioxus::prelude::*;

/// Scrollable table. `caption` is read by screen readers only.
#[component]
pub fn DataTable(caption: String, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "data-table",
            table {
                caption { class: "sr-only", "{caption}" }
                {children}
            }
        }
    }
}

#[component]
pub fn DataTableHeader(children: Element) -> Element {
    rsx! {
        thead { tr { {children} } }
    }
}

#[component]
pub fn DataTableBody(children: Element) -> Element {
    rsx! { tbody { {children} } }
}

#[component]
pub fn DataTableColumn(children: Element) -> Element {
    rsx! { th { scope: "col", {children} } }
}

#[component]
pub fn DataTableRow(children: Element) -> Element {
    rsx! { tr { class: "data-table-row", {children} } }
}

#[component]
pub fn DataTableCell(children: Element) -> Element {
    rsx! { td { {children} } }
}

/// Trailing cell for per-row buttons.
#[component]
pub fn DataTableActions(children: Element) -> Element {
    rsx! {
        td { class: "data-table-actions",
            div { class: "data-table-actions-inner", {children} }
        }
    }
}
