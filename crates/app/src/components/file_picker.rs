use dioxus::prelude::*;
use shared_types::{mime_from_filename, Attachment};

/// File input that reads the picked file into an [`Attachment`].
#[component]
pub fn FilePicker(
    label: String,
    accept: String,
    file: Signal<Option<Attachment>>,
    #[props(default)] error: Option<String>,
) -> Element {
    let mut file = file;
    let mut read_error = use_signal(|| Option::<String>::None);

    let handle_file = move |evt: FormEvent| async move {
        let files = evt.files();
        let Some(f) = files.first() else {
            file.set(None);
            return;
        };
        let name = f.name();
        let content_type = f
            .content_type()
            .unwrap_or_else(|| mime_from_filename(&name));
        match f.read_bytes().await {
            Ok(bytes) => {
                read_error.set(None);
                file.set(Some(Attachment::new(name, content_type, bytes.to_vec())));
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Could not read picked file");
                read_error.set(Some("Não foi possível ler o arquivo.".to_string()));
            }
        }
    };

    let shown_error = read_error().or(error);
    let picked = file.read().as_ref().map(|a| a.file_name.clone());

    rsx! {
        div { class: "file-picker",
            label { class: "field-label", "{label}" }
            input { r#type: "file", accept: "{accept}", onchange: handle_file }
            if let Some(name) = picked {
                span { class: "file-picker-name", "Selecionado: {name}" }
            }
            if let Some(err) = shown_error {
                span { class: "error-line", "{err}" }
            }
        }
    }
}
