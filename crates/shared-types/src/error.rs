use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Generic message shown when the server gives no usable explanation.
pub const GENERIC_ERROR_MESSAGE: &str = "Algo deu errado. Tente novamente.";

/// Categorization of client-side errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppErrorKind {
    /// Transport failure: DNS, refused connection, aborted request.
    Network,
    /// Pre-submission validation failed; nothing was sent.
    Validation,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Server,
    /// The response arrived but its body did not match the expected shape.
    Decode,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppErrorKind::Network => "Network",
            AppErrorKind::Validation => "Validation",
            AppErrorKind::BadRequest => "BadRequest",
            AppErrorKind::Unauthorized => "Unauthorized",
            AppErrorKind::Forbidden => "Forbidden",
            AppErrorKind::NotFound => "NotFound",
            AppErrorKind::Conflict => "Conflict",
            AppErrorKind::Server => "Server",
            AppErrorKind::Decode => "Decode",
        };
        f.write_str(name)
    }
}

impl AppErrorKind {
    /// Map an HTTP status code onto an error kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => AppErrorKind::BadRequest,
            401 => AppErrorKind::Unauthorized,
            403 => AppErrorKind::Forbidden,
            404 => AppErrorKind::NotFound,
            409 => AppErrorKind::Conflict,
            _ => AppErrorKind::Server,
        }
    }
}

/// Structured error surfaced to every page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

/// Error body shapes returned by the remote API. Different endpoints use
/// `message`, `msg` or `error` for the same thing.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    /// First non-blank of `message`, `msg`, `error`.
    fn into_message(self) -> Option<String> {
        [self.message, self.msg, self.error]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

impl AppError {
    fn with_kind(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Network, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::Validation,
            message: message.into(),
            field_errors,
        }
    }

    /// Validation failure naming the required fields that are still blank.
    pub fn missing_fields(fields: &[&str]) -> Self {
        let field_errors = fields
            .iter()
            .map(|f| (f.to_string(), "Campo obrigatório".to_string()))
            .collect();
        Self::validation("Preencha todos os campos obrigatórios.", field_errors)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::NotFound, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Server, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Decode, message)
    }

    /// Build an error from a non-success HTTP response.
    ///
    /// The server-provided message is kept verbatim; an empty or
    /// non-JSON body falls back to [`GENERIC_ERROR_MESSAGE`].
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        Self::with_kind(AppErrorKind::from_status(status), message)
    }

    /// True when the error should end the session.
    pub fn is_unauthorized(&self) -> bool {
        self.kind == AppErrorKind::Unauthorized
    }

    /// The single line of text a page renders for this error.
    pub fn user_message(&self) -> String {
        match self.kind {
            AppErrorKind::Network => {
                "Não foi possível conectar ao servidor. Verifique sua conexão.".to_string()
            }
            AppErrorKind::Decode => GENERIC_ERROR_MESSAGE.to_string(),
            _ => self.message.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Valor inválido para {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        let message = field_errors
            .values()
            .next()
            .cloned()
            .unwrap_or_else(|| "Dados inválidos.".to_string());
        AppError::validation(message, field_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response_reads_message_field() {
        let err = AppError::from_response(400, r#"{"message":"Caso já existe"}"#);
        assert_eq!(err.kind, AppErrorKind::BadRequest);
        assert_eq!(err.message, "Caso já existe");
    }

    #[test]
    fn from_response_reads_msg_field() {
        let err = AppError::from_response(401, r#"{"msg":"Token inválido"}"#);
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
        assert_eq!(err.message, "Token inválido");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn from_response_reads_error_field() {
        let err = AppError::from_response(500, r#"{"error":"Falha interna"}"#);
        assert_eq!(err.kind, AppErrorKind::Server);
        assert_eq!(err.message, "Falha interna");
    }

    #[test]
    fn from_response_prefers_message_over_error_label() {
        let err = AppError::from_response(
            400,
            r#"{"error":"Bad Request","message":"Email já cadastrado"}"#,
        );
        assert_eq!(err.kind, AppErrorKind::BadRequest);
        assert_eq!(err.message, "Email já cadastrado");

        let err = AppError::from_response(400, r#"{"msg":"","error":"Dados inválidos"}"#);
        assert_eq!(err.message, "Dados inválidos");
    }

    #[test]
    fn from_response_falls_back_for_garbage() {
        let err = AppError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.kind, AppErrorKind::Server);
        assert_eq!(err.message, GENERIC_ERROR_MESSAGE);

        let err = AppError::from_response(404, "");
        assert_eq!(err.kind, AppErrorKind::NotFound);
        assert_eq!(err.message, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn from_response_blank_message_falls_back() {
        let err = AppError::from_response(403, r#"{"message":"   "}"#);
        assert_eq!(err.kind, AppErrorKind::Forbidden);
        assert_eq!(err.message, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(AppErrorKind::from_status(422), AppErrorKind::BadRequest);
        assert_eq!(AppErrorKind::from_status(409), AppErrorKind::Conflict);
        assert_eq!(AppErrorKind::from_status(503), AppErrorKind::Server);
    }

    #[test]
    fn missing_fields_lists_each_field() {
        let err = AppError::missing_fields(&["title", "cidade"]);
        assert_eq!(err.kind, AppErrorKind::Validation);
        assert_eq!(err.field_errors.len(), 2);
        assert_eq!(err.field_errors["cidade"], "Campo obrigatório");
    }

    #[test]
    fn network_errors_get_a_friendly_line() {
        let err = AppError::network("error sending request for url");
        assert!(err.user_message().starts_with("Não foi possível conectar"));
        let err = AppError::server("Caso não encontrado");
        assert_eq!(err.user_message(), "Caso não encontrado");
    }

    #[test]
    fn display_impl_formats_correctly() {
        let err = AppError::unauthorized("sessão expirada");
        assert_eq!(format!("{}", err), "Unauthorized: sessão expirada");
    }
}
