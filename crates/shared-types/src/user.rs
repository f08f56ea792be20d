use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::common::is_blank;
use crate::error::AppError;
use crate::listing::{Identified, Searchable};
use crate::role::Role;
use crate::wizard::{require, WizardForm};

/// Minimum password length accepted by the client before submitting.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A system user as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub nome: String,
    pub email: String,
    #[serde(default)]
    pub cpf: String,
    /// Professional registration number (CRO), when the user has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cro: Option<String>,
    /// Raw role string; see [`User::role`].
    #[serde(default)]
    pub perfil: String,
}

impl User {
    /// Parsed role. `None` when the API sent an unknown `perfil`.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.perfil)
    }

    /// Role label for display; unknown roles are shown as sent.
    pub fn role_label(&self) -> String {
        self.role()
            .map(|r| r.as_str().to_string())
            .unwrap_or_else(|| self.perfil.clone())
    }
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for User {
    fn haystack(&self) -> String {
        format!("{} {} {} {}", self.nome, self.email, self.cpf, self.perfil)
    }
}

/// Some endpoints wrap the user in `{ "user": ... }`, others return it bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

impl UserEnvelope {
    pub fn into_user(self) -> User {
        match self {
            UserEnvelope::Wrapped { user } => user,
            UserEnvelope::Bare(user) => user,
        }
    }
}

// ── Login ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(alias = "usuario")]
    pub user: User,
}

/// Login screen state. Submission is allowed only when both fields are filled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub senha: String,
}

impl LoginForm {
    pub fn can_submit(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.email) {
            missing.push("email");
        }
        if self.senha.is_empty() {
            missing.push("senha");
        }
        missing
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            senha: self.senha.clone(),
        }
    }
}

// ── Registration ────────────────────────────────────────────────────

/// Payload for `POST /api/user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub nome: String,
    #[validate(email(message = "E-mail inválido"))]
    pub email: String,
    #[validate(length(equal = 11, message = "CPF deve ter 11 dígitos"))]
    pub cpf: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cro: Option<String>,
    pub perfil: String,
    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub senha: String,
}

/// Two-step user registration wizard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRegistrationForm {
    pub nome: String,
    pub email: String,
    pub cpf: String,
    pub cro: String,
    pub perfil: Option<Role>,
    pub senha: String,
    pub confirmacao: String,
}

impl WizardForm for UserRegistrationForm {
    const STEPS: &'static [&'static str] = &["Dados pessoais", "Acesso"];

    fn missing_fields(&self, step: usize) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            0 => {
                require(&mut missing, "nome", &self.nome);
                require(&mut missing, "email", &self.email);
                require(&mut missing, "cpf", &self.cpf);
            }
            1 => {
                if self.perfil.is_none() {
                    missing.push("perfil");
                }
                require(&mut missing, "senha", &self.senha);
                require(&mut missing, "confirmacao", &self.confirmacao);
            }
            _ => {}
        }
        missing
    }
}

/// Keep only the digits of a CPF as typed ("123.456.789-09").
pub fn cpf_digits(cpf: &str) -> String {
    cpf.chars().filter(char::is_ascii_digit).collect()
}

impl UserRegistrationForm {
    /// Build the request, running every pre-submission check.
    pub fn to_request(&self) -> Result<RegisterUserRequest, AppError> {
        let missing = self.all_missing_fields();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }
        if self.senha != self.confirmacao {
            let mut fields = HashMap::new();
            fields.insert("confirmacao".to_string(), "As senhas não coincidem".to_string());
            return Err(AppError::validation("As senhas não coincidem.", fields));
        }
        let role = self.perfil.unwrap_or(Role::Assistente);
        let request = RegisterUserRequest {
            nome: self.nome.trim().to_string(),
            email: self.email.trim().to_string(),
            cpf: cpf_digits(&self.cpf),
            cro: Some(self.cro.trim().to_string()).filter(|c| !c.is_empty()),
            perfil: role.as_str().to_string(),
            senha: self.senha.clone(),
        };
        request.validate()?;
        Ok(request)
    }
}

/// Payload for `PUT /api/user/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub nome: String,
    pub email: String,
    pub cpf: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cro: Option<String>,
    pub perfil: String,
}

impl From<&User> for UpdateUserRequest {
    fn from(u: &User) -> Self {
        Self {
            nome: u.nome.trim().to_string(),
            email: u.email.trim().to_string(),
            cpf: cpf_digits(&u.cpf),
            cro: u.cro.clone().filter(|c| !is_blank(c)),
            perfil: u.perfil.clone(),
        }
    }
}

// ── Password change ─────────────────────────────────────────────────

/// Payload for `PUT /api/user/password`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub senha_atual: String,
    pub nova_senha: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChangeForm {
    pub senha_atual: String,
    pub nova_senha: String,
    pub confirmacao: String,
}

impl WizardForm for PasswordChangeForm {
    const STEPS: &'static [&'static str] = &["Nova senha"];

    fn missing_fields(&self, step: usize) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if step == 0 {
            require(&mut missing, "senha_atual", &self.senha_atual);
            require(&mut missing, "nova_senha", &self.nova_senha);
            require(&mut missing, "confirmacao", &self.confirmacao);
        }
        missing
    }
}

impl PasswordChangeForm {
    pub fn to_request(&self) -> Result<ChangePasswordRequest, AppError> {
        let missing = self.all_missing_fields();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }
        let mut fields = HashMap::new();
        if self.nova_senha.chars().count() < MIN_PASSWORD_LEN {
            fields.insert(
                "nova_senha".to_string(),
                format!("A senha deve ter pelo menos {MIN_PASSWORD_LEN} caracteres"),
            );
        } else if self.nova_senha != self.confirmacao {
            fields.insert("confirmacao".to_string(), "As senhas não coincidem".to_string());
        } else if self.nova_senha == self.senha_atual {
            fields.insert(
                "nova_senha".to_string(),
                "A nova senha deve ser diferente da atual".to_string(),
            );
        }
        if let Some(message) = fields.values().next().cloned() {
            return Err(AppError::validation(message, fields));
        }
        Ok(ChangePasswordRequest {
            senha_atual: self.senha_atual.clone(),
            nova_senha: self.nova_senha.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppErrorKind;

    fn filled_registration() -> UserRegistrationForm {
        UserRegistrationForm {
            nome: "Carla Mendes".to_string(),
            email: "carla@odx.test".to_string(),
            cpf: "123.456.789-09".to_string(),
            cro: String::new(),
            perfil: Some(Role::Perito),
            senha: "segredo1".to_string(),
            confirmacao: "segredo1".to_string(),
        }
    }

    #[test]
    fn user_deserializes_with_mongo_id() {
        let user: User = serde_json::from_str(
            r#"{"_id":"64f","nome":"Ana","email":"ana@x.test","cpf":"1","perfil":"perito"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "64f");
        assert_eq!(user.role(), Some(Role::Perito));
        assert_eq!(user.role_label(), "Perito");
        assert!(user.cro.is_none());
    }

    #[test]
    fn envelope_accepts_wrapped_and_bare() {
        let wrapped: UserEnvelope =
            serde_json::from_str(r#"{"user":{"id":"1","nome":"A","email":"a@x.test"}}"#).unwrap();
        assert_eq!(wrapped.into_user().id, "1");
        let bare: UserEnvelope =
            serde_json::from_str(r#"{"id":"2","nome":"B","email":"b@x.test"}"#).unwrap();
        assert_eq!(bare.into_user().id, "2");
    }

    #[test]
    fn login_form_requires_both_fields() {
        let mut form = LoginForm::default();
        assert!(!form.can_submit());
        assert_eq!(form.missing_fields(), vec!["email", "senha"]);
        form.email = " ana@x.test ".to_string();
        assert!(!form.can_submit());
        form.senha = "x".to_string();
        assert!(form.can_submit());
        assert_eq!(form.to_request().email, "ana@x.test");
    }

    #[test]
    fn registration_steps_gate_on_required_fields() {
        let mut form = UserRegistrationForm::default();
        assert_eq!(form.missing_fields(0), vec!["nome", "email", "cpf"]);
        assert_eq!(form.missing_fields(1), vec!["perfil", "senha", "confirmacao"]);
        form.nome = "X".to_string();
        form.email = "x@x.test".to_string();
        form.cpf = "1".to_string();
        assert!(form.step_complete(0));
    }

    #[test]
    fn registration_builds_request() {
        let req = filled_registration().to_request().unwrap();
        assert_eq!(req.cpf, "12345678909");
        assert_eq!(req.perfil, "Perito");
        assert!(req.cro.is_none());
    }

    #[test]
    fn registration_rejects_mismatched_passwords() {
        let mut form = filled_registration();
        form.confirmacao = "outra123".to_string();
        let err = form.to_request().unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Validation);
        assert!(err.field_errors.contains_key("confirmacao"));
    }

    #[test]
    fn registration_rejects_bad_email_and_short_password() {
        let mut form = filled_registration();
        form.email = "nao-e-email".to_string();
        let err = form.to_request().unwrap_err();
        assert!(err.field_errors.contains_key("email"));

        let mut form = filled_registration();
        form.senha = "abc".to_string();
        form.confirmacao = "abc".to_string();
        let err = form.to_request().unwrap_err();
        assert!(err.field_errors.contains_key("senha"));
    }

    #[test]
    fn password_change_rules() {
        let mut form = PasswordChangeForm {
            senha_atual: "antiga1".to_string(),
            nova_senha: "nova123".to_string(),
            confirmacao: "nova123".to_string(),
        };
        let req = form.to_request().unwrap();
        assert_eq!(req.nova_senha, "nova123");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["senhaAtual"], "antiga1");
        assert_eq!(json["novaSenha"], "nova123");

        form.confirmacao = "diferente".to_string();
        assert!(form.to_request().is_err());

        form.nova_senha = "antiga1".to_string();
        form.confirmacao = "antiga1".to_string();
        assert!(form.to_request().unwrap_err().field_errors.contains_key("nova_senha"));

        form.nova_senha = "abc".to_string();
        form.confirmacao = "abc".to_string();
        assert!(form.to_request().is_err());
    }

    #[test]
    fn update_request_from_user_normalizes() {
        let user = User {
            id: "1".to_string(),
            nome: " Ana ".to_string(),
            email: "ana@x.test".to_string(),
            cpf: "123.456.789-09".to_string(),
            cro: Some("  ".to_string()),
            perfil: "Perito".to_string(),
        };
        let req = UpdateUserRequest::from(&user);
        assert_eq!(req.nome, "Ana");
        assert_eq!(req.cpf, "12345678909");
        assert!(req.cro.is_none());
    }
}
