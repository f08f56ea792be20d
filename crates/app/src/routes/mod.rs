pub mod cases;
pub mod change_password;
pub mod dashboard;
pub mod evidence;
pub mod laudos;
pub mod login;
pub mod not_found;
pub mod reports;
pub mod users;
pub mod victims;

use api_client::SessionState;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdFileText, LdFolder, LdLayoutDashboard, LdLogOut, LdScale, LdSearch, LdShield, LdUserCheck,
    LdUsers,
};
use dioxus_free_icons::Icon;
use shared_types::{can, Capability, User};
use shared_ui::{Badge, Tone, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

use crate::auth::use_auth;
use crate::capability_gate::RequireCapability;

use dashboard::Dashboard;
use login::Login;
use not_found::NotFound;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login")]
    Login {},
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/")]
    Dashboard {},
    #[route("/visao-geral", Dashboard)]
    Overview {},
    #[route("/casos")]
    CaseList {},
    #[route("/casos/novo")]
    CaseCreate {},
    #[route("/evidencias")]
    EvidenceList {},
    #[route("/evidencias/nova")]
    EvidenceCreate {},
    #[route("/vitimas")]
    VictimList {},
    #[route("/laudos")]
    LaudoList {},
    #[route("/laudos/novo")]
    LaudoCreate {},
    #[route("/relatorios")]
    ReportList {},
    #[route("/relatorios/novo")]
    ReportCreate {},
    #[route("/usuarios")]
    UserList {},
    #[route("/usuarios/novo")]
    UserRegister {},
    #[route("/alterar-senha")]
    ChangePassword {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Icon shown next to a navigation entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavIcon {
    Dashboard,
    Cases,
    Evidence,
    Victims,
    Laudos,
    Reports,
    Users,
    Password,
}

/// One header navigation link and the capability that reveals it.
#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub label: &'static str,
    pub route: Route,
    pub capability: Capability,
    pub icon: NavIcon,
}

pub fn nav_entries() -> Vec<NavEntry> {
    vec![
        NavEntry { label: "Painel", route: Route::Dashboard {}, capability: Capability::ViewDashboard, icon: NavIcon::Dashboard },
        NavEntry { label: "Casos", route: Route::CaseList {}, capability: Capability::ViewCases, icon: NavIcon::Cases },
        NavEntry { label: "Evidências", route: Route::EvidenceList {}, capability: Capability::ViewEvidence, icon: NavIcon::Evidence },
        NavEntry { label: "Vítimas", route: Route::VictimList {}, capability: Capability::ViewVictims, icon: NavIcon::Victims },
        NavEntry { label: "Laudos", route: Route::LaudoList {}, capability: Capability::ViewLaudos, icon: NavIcon::Laudos },
        NavEntry { label: "Relatórios", route: Route::ReportList {}, capability: Capability::ViewReports, icon: NavIcon::Reports },
        NavEntry { label: "Usuários", route: Route::UserList {}, capability: Capability::ManageUsers, icon: NavIcon::Users },
        NavEntry { label: "Alterar senha", route: Route::ChangePassword {}, capability: Capability::ChangePassword, icon: NavIcon::Password },
    ]
}

/// Entries `user` may see, in menu order.
pub fn visible_entries(user: &User) -> Vec<NavEntry> {
    nav_entries()
        .into_iter()
        .filter(|entry| can(user, entry.capability))
        .collect()
}

/// The menu entry a route belongs to; form pages highlight their list.
pub fn nav_parent(route: &Route) -> Route {
    match route {
        Route::Overview {} => Route::Dashboard {},
        Route::CaseCreate {} => Route::CaseList {},
        Route::EvidenceCreate {} => Route::EvidenceList {},
        Route::LaudoCreate {} => Route::LaudoList {},
        Route::ReportCreate {} => Route::ReportList {},
        Route::UserRegister {} => Route::UserList {},
        other => other.clone(),
    }
}

/// Auth guard layout: restores the session on every mount and redirects
/// to `/login` when there is none.
#[component]
fn AuthGuard() -> Element {
    let auth = use_auth();
    let restore = use_resource(move || async move { auth.restore().await });

    let state = auth.state.read().clone();
    let restoring = restore.read().is_none();

    match state {
        SessionState::Authenticated(_) => rsx! { Outlet::<Route> {} },
        SessionState::Failed(message) if !restoring => rsx! {
            div { class: "auth-guard-loading",
                Card {
                    CardHeader {
                        CardTitle { "Não foi possível validar a sessão" }
                        CardDescription { "{message}" }
                    }
                    CardContent {
                        Button {
                            onclick: move |_| {
                                navigator().push(Route::Login {});
                            },
                            "Entrar novamente"
                        }
                    }
                }
            }
        },
        SessionState::Unauthenticated if !restoring => {
            navigator().push(Route::Login {});
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecionando para o login..." }
                }
            }
        }
        _ => rsx! {
            div { class: "auth-guard-loading",
                p { "Carregando..." }
            }
        },
    }
}

/// Header navigation plus page content.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let auth = use_auth();
    let user = auth.user();

    let entries = user.as_ref().map(visible_entries).unwrap_or_default();
    let active = nav_parent(&route);
    let name = user.as_ref().map(|u| u.nome.clone()).unwrap_or_default();
    let role = user.as_ref().map(User::role_label).unwrap_or_default();

    let handle_logout = move |_| {
        spawn(async move {
            auth.logout().await;
            navigator().push(Route::Login {});
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        div { class: "app-shell",
            header { class: "app-header",
                div { class: "app-brand",
                    span { class: "app-brand-mark", "ODX" }
                    span { class: "app-brand-name", "Perícias" }
                }
                nav { class: "app-nav",
                    for entry in entries {
                        Link {
                            key: "{entry.label}",
                            to: entry.route.clone(),
                            class: if entry.route == active { "app-nav-link active" } else { "app-nav-link" },
                            NavGlyph { icon: entry.icon }
                            span { "{entry.label}" }
                        }
                    }
                }
                div { class: "app-user",
                    span { class: "app-user-name", "{name}" }
                    Badge { tone: Tone::Info, "{role}" }
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: handle_logout,
                        Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                        "Sair"
                    }
                }
            }
            main { class: "page-content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn NavGlyph(icon: NavIcon) -> Element {
    match icon {
        NavIcon::Dashboard => rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 16, height: 16 } },
        NavIcon::Cases => rsx! { Icon::<LdFolder> { icon: LdFolder, width: 16, height: 16 } },
        NavIcon::Evidence => rsx! { Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 } },
        NavIcon::Victims => rsx! { Icon::<LdUserCheck> { icon: LdUserCheck, width: 16, height: 16 } },
        NavIcon::Laudos => rsx! { Icon::<LdScale> { icon: LdScale, width: 16, height: 16 } },
        NavIcon::Reports => rsx! { Icon::<LdFileText> { icon: LdFileText, width: 16, height: 16 } },
        NavIcon::Users => rsx! { Icon::<LdUsers> { icon: LdUsers, width: 16, height: 16 } },
        NavIcon::Password => rsx! { Icon::<LdShield> { icon: LdShield, width: 16, height: 16 } },
    }
}

// Route components. Each page declares the capability it needs.

#[component]
fn CaseList() -> Element {
    rsx! {
        RequireCapability { required: Capability::ViewCases, cases::list::CaseListPage {} }
    }
}

#[component]
fn CaseCreate() -> Element {
    rsx! {
        RequireCapability { required: Capability::RegisterCase, cases::create::CaseCreatePage {} }
    }
}

#[component]
fn EvidenceList() -> Element {
    rsx! {
        RequireCapability { required: Capability::ViewEvidence, evidence::list::EvidenceListPage {} }
    }
}

#[component]
fn EvidenceCreate() -> Element {
    rsx! {
        RequireCapability { required: Capability::RegisterEvidence, evidence::create::EvidenceCreatePage {} }
    }
}

#[component]
fn VictimList() -> Element {
    rsx! {
        RequireCapability { required: Capability::ViewVictims, victims::VictimListPage {} }
    }
}

#[component]
fn LaudoList() -> Element {
    rsx! {
        RequireCapability { required: Capability::ViewLaudos, laudos::list::LaudoListPage {} }
    }
}

#[component]
fn LaudoCreate() -> Element {
    rsx! {
        RequireCapability { required: Capability::IssueLaudo, laudos::create::LaudoCreatePage {} }
    }
}

#[component]
fn ReportList() -> Element {
    rsx! {
        RequireCapability { required: Capability::ViewReports, reports::list::ReportListPage {} }
    }
}

#[component]
fn ReportCreate() -> Element {
    rsx! {
        RequireCapability { required: Capability::GenerateReport, reports::create::ReportCreatePage {} }
    }
}

#[component]
fn UserList() -> Element {
    rsx! {
        RequireCapability { required: Capability::ManageUsers, users::list::UserListPage {} }
    }
}

#[component]
fn UserRegister() -> Element {
    rsx! {
        RequireCapability { required: Capability::ManageUsers, users::register::UserRegisterPage {} }
    }
}

#[component]
fn ChangePassword() -> Element {
    rsx! {
        RequireCapability { required: Capability::ChangePassword, change_password::ChangePasswordPage {} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user_with(perfil: &str) -> User {
        User {
            id: "u1".to_string(),
            nome: "Ana".to_string(),
            email: "ana@odx.test".to_string(),
            cpf: String::new(),
            cro: None,
            perfil: perfil.to_string(),
        }
    }

    fn labels(entries: &[NavEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.label).collect()
    }

    #[test]
    fn admin_sees_every_entry() {
        assert_eq!(visible_entries(&user_with("Admin")).len(), nav_entries().len());
    }

    #[test]
    fn assistente_menu_hides_user_management() {
        let entries = visible_entries(&user_with("assistente"));
        let labels = labels(&entries);
        assert!(labels.contains(&"Casos"));
        assert!(labels.contains(&"Alterar senha"));
        assert!(!labels.contains(&"Usuários"));
    }

    #[test]
    fn unknown_role_sees_nothing() {
        assert!(visible_entries(&user_with("visitante")).is_empty());
    }

    #[test]
    fn form_pages_highlight_their_list() {
        assert_eq!(nav_parent(&Route::CaseCreate {}), Route::CaseList {});
        assert_eq!(nav_parent(&Route::Overview {}), Route::Dashboard {});
        assert_eq!(nav_parent(&Route::VictimList {}), Route::VictimList {});
    }

    #[test]
    fn overview_and_root_render_the_dashboard() {
        assert_eq!(Route::Overview {}.to_string(), "/visao-geral");
        assert_eq!(Route::Dashboard {}.to_string(), "/");
        assert_eq!(
            "/casos/novo".parse::<Route>().ok(),
            Some(Route::CaseCreate {})
        );
    }
}
