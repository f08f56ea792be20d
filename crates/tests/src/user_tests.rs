use std::sync::Arc;

use api_client::api::users::{change_password, list_experts, register_user, update_user};
use api_client::MemoryTokenStore;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{
    AppErrorKind, PasswordChangeForm, Role, UpdateUserRequest, User, UserRegistrationForm,
};

use crate::common::{user_json, MockApi};

#[tokio::test]
async fn registration_sends_digits_only_cpf() {
    let api = MockApi::start().await;
    api.respond("POST", "/api/user", 201, json!({ "user": user_json("u9", "Bruno Sá", "Assistente") }));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let form = UserRegistrationForm {
        nome: "Bruno Sá".to_string(),
        email: "bruno@odx.test".to_string(),
        cpf: "123.456.789-09".to_string(),
        perfil: Some(Role::Assistente),
        senha: "segredo1".to_string(),
        confirmacao: "segredo1".to_string(),
        ..Default::default()
    };
    let user = register_user(&client, &form.to_request().unwrap()).await.unwrap();
    assert_eq!(user.id, "u9");
    assert_eq!(user.role(), Some(Role::Assistente));

    let body = api.requests_to("POST", "/api/user")[0].json();
    assert_eq!(body["cpf"], "12345678909");
    assert_eq!(body["perfil"], "Assistente");
    assert!(body.get("cro").is_none());
}

#[tokio::test]
async fn non_admin_edit_is_forbidden() {
    let api = MockApi::start().await;
    api.respond("PUT", "/api/user/u2", 403, json!({ "message": "Acesso negado" }));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let user: User = serde_json::from_value(user_json("u2", "Carla", "Perito")).unwrap();
    let err = update_user(&client, "u2", &UpdateUserRequest::from(&user))
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Forbidden);
    assert!(!err.is_unauthorized());
    assert_eq!(err.user_message(), "Acesso negado");
}

#[tokio::test]
async fn password_change_puts_both_passwords() {
    let api = MockApi::start().await;
    api.respond("PUT", "/api/user/password", 200, json!({ "message": "Senha alterada" }));
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let form = PasswordChangeForm {
        senha_atual: "antiga1".to_string(),
        nova_senha: "novinha2".to_string(),
        confirmacao: "novinha2".to_string(),
    };
    change_password(&client, &form.to_request().unwrap()).await.unwrap();

    let body = api.requests_to("PUT", "/api/user/password")[0].json();
    assert_eq!(body, json!({ "senhaAtual": "antiga1", "novaSenha": "novinha2" }));
}

#[tokio::test]
async fn experts_accept_a_bare_array() {
    let api = MockApi::start().await;
    api.respond(
        "GET",
        "/api/experts",
        200,
        json!([user_json("u1", "Ana", "Perito"), user_json("u3", "Davi", "Admin")]),
    );
    let client = api.client(Arc::new(MemoryTokenStore::with_token("tok")));

    let experts = list_experts(&client).await.unwrap();
    let names: Vec<&str> = experts.iter().map(|u| u.nome.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Davi"]);
}
