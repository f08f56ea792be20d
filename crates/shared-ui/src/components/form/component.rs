use dioxus::prelude::*;

/// `<form>` whose submission is handled in-page. Browser validation is off;
/// field checks run in the form types and surface through [`FormError`].
#[component]
pub fn Form(onsubmit: EventHandler<FormEvent>, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            class: "form",
            novalidate: true,
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            {children}
        }
    }
}

#[component]
pub fn FormError(message: String) -> Element {
    rsx! {
        p { class: "form-error", role: "alert", "{message}" }
    }
}
