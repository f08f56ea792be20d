use api_client::api::users::{delete_user, list_users, update_user};
use dioxus::prelude::*;
use shared_types::{
    filter_by_text, group_by_key, remove_record, replace_record, PageQuery, Role, UpdateUserRequest,
    User, ALL_ROLES,
};
use shared_ui::{
    use_toast, Button, ButtonVariant, ConfirmDialog, DataTable, DataTableActions, DataTableBody,
    DataTableCell, DataTableColumn, DataTableHeader, DataTableRow, Form, FormError, FormSelect,
    Input, LoadingRows, Modal, ModalFooter, PageHeader, Pagination,
    SearchBar, ToastOptions,
};

use crate::auth::use_auth;
use crate::components::{ListError, ListSection};
use crate::routes::Route;
use crate::tasks::use_latest_task;

const PAGE_SIZE: u32 = 20;

/// Section order; users whose `perfil` is not a known role come last.
const ROLE_SECTIONS: &[Option<Role>] = &[
    Some(Role::Admin),
    Some(Role::Perito),
    Some(Role::Assistente),
    None,
];

fn section_title(role: Option<Role>) -> String {
    role.map(|r| r.as_str().to_string())
        .unwrap_or_else(|| "Perfil desconhecido".to_string())
}

/// User administration. Only reachable with `ManageUsers`, so the row
/// actions are not gated again here.
#[component]
pub fn UserListPage() -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let own_id = auth.user().map(|u| u.id).unwrap_or_default();

    let page = use_signal(|| 1u32);
    let mut search = use_signal(String::new);
    let mut users = use_signal(Vec::<User>::new);
    let mut total_pages = use_signal(|| 1u32);
    let mut total = use_signal(|| 0u64);

    let mut editing = use_signal(|| Option::<User>::None);
    let mut edit_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<User>::None);
    let mut deleting = use_signal(|| false);
    let mut save_task = use_latest_task();
    let mut delete_task = use_latest_task();

    let mut data = use_resource(move || {
        let query = PageQuery::new(*page.read(), PAGE_SIZE);
        async move {
            let client = auth.client();
            auth.checked(list_users(&client, &query).await)
        }
    });

    use_effect(move || {
        if let Some(Ok(result)) = &*data.read() {
            users.set(result.data.clone());
            total_pages.set(result.total_pages);
            total.set(result.total);
        }
    });

    let handle_save = move |_: FormEvent| {
        let Some(draft) = editing.read().clone() else {
            return;
        };
        if draft.nome.trim().is_empty() || draft.email.trim().is_empty() {
            edit_error.set(Some("Nome e e-mail são obrigatórios.".to_string()));
            return;
        }
        saving.set(true);
        edit_error.set(None);
        save_task.run(async move {
            let client = auth.client();
            let request = UpdateUserRequest::from(&draft);
            match auth.checked(update_user(&client, &draft.id, &request).await) {
                Ok(updated) => {
                    replace_record(&mut users.write(), updated);
                    editing.set(None);
                    toast.success("Usuário atualizado.".to_string(), ToastOptions::new());
                }
                Err(e) => edit_error.set(Some(e.user_message())),
            }
            saving.set(false);
        });
    };

    let handle_delete = move |_| {
        let Some(target) = pending_delete.read().clone() else {
            return;
        };
        deleting.set(true);
        delete_task.run(async move {
            let client = auth.client();
            match auth.checked(delete_user(&client, &target.id).await) {
                Ok(()) => {
                    remove_record(&mut users.write(), &target.id);
                    total.set(total().saturating_sub(1));
                    toast.success("Usuário excluído.".to_string(), ToastOptions::new());
                }
                Err(e) => toast.error(e.user_message(), ToastOptions::new()),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let loaded = data.read().as_ref().map(|r| r.as_ref().map(|_| ()).map_err(Clone::clone));
    let visible = filter_by_text(&users.read(), &search.read());
    let groups = group_by_key(&visible, ROLE_SECTIONS, User::role);

    rsx! {
        div { class: "container",
            PageHeader { title: "Usuários",
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| {
                        navigator().push(Route::UserRegister {});
                    },
                    "Novo usuário"
                }
            }

            SearchBar {
                Input {
                    value: search.read().clone(),
                    placeholder: "Buscar por nome, e-mail, CPF...",
                    on_input: move |evt: FormEvent| search.set(evt.value()),
                }
            }

            match loaded {
                None => rsx! { LoadingRows {} },
                Some(Err(err)) => rsx! {
                    ListError { error: err, on_retry: move |_| data.restart() }
                },
                Some(Ok(())) => rsx! {
                    if groups.is_empty() {
                        p { class: "muted", "Nenhum usuário encontrado." }
                    }
                    for (role, members) in groups {
                        ListSection { key: "{section_title(role)}", title: section_title(role), count: members.len(),
                            UserTable {
                                users: members,
                                own_id: own_id.clone(),
                                on_edit: move |user: User| {
                                    edit_error.set(None);
                                    editing.set(Some(user));
                                },
                                on_delete: move |user: User| pending_delete.set(Some(user)),
                            }
                        }
                    }
                    Pagination { page, total_pages: total_pages(), total: Some(total()) }
                },
            }

            Modal {
                open: editing.read().is_some(),
                on_close: move |_| editing.set(None),
                title: "Editar usuário",
                if let Some(draft) = editing.read().clone() {
                    Form { onsubmit: handle_save,
                        div { class: "wizard-fields",
                            Input {
                                label: "Nome",
                                required: true,
                                value: draft.nome.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.nome = evt.value();
                                    }
                                },
                            }
                            Input {
                                label: "E-mail",
                                input_type: "email",
                                required: true,
                                value: draft.email.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.email = evt.value();
                                    }
                                },
                            }
                            Input {
                                label: "CPF",
                                value: draft.cpf.clone(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.cpf = evt.value();
                                    }
                                },
                            }
                            Input {
                                label: "CRO",
                                value: draft.cro.clone().unwrap_or_default(),
                                on_input: move |evt: FormEvent| {
                                    if let Some(d) = editing.write().as_mut() {
                                        d.cro = Some(evt.value());
                                    }
                                },
                            }
                            FormSelect {
                                label: "Perfil",
                                value: draft.role().map(|r| r.as_str()).unwrap_or_default(),
                                onchange: move |evt: FormEvent| {
                                    if let (Some(d), Some(role)) = (editing.write().as_mut(), Role::parse(&evt.value())) {
                                        d.perfil = role.as_str().to_string();
                                    }
                                },
                                for role in ALL_ROLES.iter() {
                                    option { key: "{role.as_str()}", value: role.as_str(), "{role.as_str()}" }
                                }
                            }
                        }
                        if let Some(err) = edit_error() {
                            FormError { message: err }
                        }
                        ModalFooter {
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: move |_| editing.set(None),
                                "Cancelar"
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                submit: true,
                                busy: saving(),
                                if saving() { "Salvando..." } else { "Salvar" }
                            }
                        }
                    }
                }
            }

            ConfirmDialog {
                open: pending_delete.read().is_some(),
                title: "Excluir usuário?",
                description: pending_delete
                    .read()
                    .as_ref()
                    .map(|u| format!("{} perderá o acesso ao sistema.", u.nome))
                    .unwrap_or_default(),
                busy: deleting(),
                on_confirm: handle_delete,
                on_cancel: move |_| {
                    if !deleting() {
                        pending_delete.set(None);
                    }
                },
            }
        }
    }
}

#[component]
fn UserTable(
    users: Vec<User>,
    own_id: String,
    on_edit: EventHandler<User>,
    on_delete: EventHandler<User>,
) -> Element {
    rsx! {
        DataTable { caption: "Usuários",
            DataTableHeader {
                DataTableColumn { "Nome" }
                DataTableColumn { "E-mail" }
                DataTableColumn { "CPF" }
                DataTableColumn { "CRO" }
                DataTableColumn { "" }
            }
            DataTableBody {
                for user in users {
                    DataTableRow { key: "{user.id}",
                        DataTableCell { "{user.nome}" }
                        DataTableCell { "{user.email}" }
                        DataTableCell { span { class: "mono", "{user.cpf}" } }
                        DataTableCell { {user.cro.clone().unwrap_or_else(|| "—".to_string())} }
                        DataTableActions {
                            Button {
                                variant: ButtonVariant::Ghost,
                                onclick: {
                                    let user = user.clone();
                                    move |_| on_edit.call(user.clone())
                                },
                                "Editar"
                            }
                            // Deleting your own account would end the session mid-request.
                            if user.id != own_id {
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    onclick: {
                                        let user = user.clone();
                                        move |_| on_delete.call(user.clone())
                                    },
                                    "Excluir"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
