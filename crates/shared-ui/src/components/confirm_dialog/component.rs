use dioxus::prelude::*;
use dioxus_primitives::alert_dialog as prim;

/// Yes/no prompt in front of destructive actions. Dismissing the dialog
/// any way other than the confirm button calls `on_cancel`.
#[component]
pub fn ConfirmDialog(
    open: bool,
    title: String,
    description: String,
    #[props(default = "Excluir".to_string())] confirm_label: String,
    #[props(default = false)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::AlertDialogRoot {
            class: "confirm-dialog-overlay",
            open: open,
            on_open_change: move |next: bool| {
                if !next {
                    on_cancel.call(());
                }
            },
            prim::AlertDialogContent {
                class: "confirm-dialog".to_string(),
                prim::AlertDialogTitle { class: "confirm-dialog-title", "{title}" }
                prim::AlertDialogDescription { class: "confirm-dialog-description", "{description}" }
                prim::AlertDialogActions {
                    class: "confirm-dialog-actions",
                    prim::AlertDialogCancel { class: "confirm-dialog-cancel", "Cancelar" }
                    prim::AlertDialogAction {
                        class: "confirm-dialog-confirm",
                        "aria-busy": busy,
                        on_click: move |_| {
                            if !busy {
                                on_confirm.call(());
                            }
                        },
                        if busy { "Aguarde..." } else { "{confirm_label}" }
                    }
                }
            }
        }
    }
}
