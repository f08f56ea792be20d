use dioxus::prelude::*;

/// Native `<select>` styled for forms and list filters.
///
/// Children are `option { value: "...", "Label" }` elements. When
/// `placeholder` is set, an empty-valued first option is rendered so a
/// required choice starts unselected.
#[component]
pub fn FormSelect(
    #[props(default)] value: String,
    #[props(default)] onchange: Option<EventHandler<Event<FormData>>>,
    #[props(default)] label: String,
    #[props(default)] placeholder: String,
    #[props(default = false)] disabled: bool,
    #[props(default)] error: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "form-select-wrapper",
            if !label.is_empty() {
                label { class: "form-select-label", "{label}" }
            }
            select {
                class: "form-select",
                "aria-invalid": error.is_some(),
                value: value,
                disabled: disabled,
                onchange: move |evt| {
                    if let Some(handler) = &onchange {
                        handler.call(evt);
                    }
                },
                if !placeholder.is_empty() {
                    option { value: "", disabled: true, "{placeholder}" }
                }
                {children}
            }
            if let Some(err) = error {
                span { class: "field-error", "{err}" }
            }
        }
    }
}
