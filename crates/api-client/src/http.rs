use std::collections::HashMap;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{AppError, Attachment};

use crate::token::TokenStore;

/// The shared HTTP client. Every request is sent to `base_url + path` and
/// carries `Authorization: Bearer <token>` once the store holds a token.
///
/// No retries, timeouts or de-duplication: a failure surfaces as one
/// [`AppError`] to the caller.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // --- Verbs ---

    #[tracing::instrument(skip(self), fields(method = "GET"))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let body = self.execute(path, self.request(Method::GET, path)).await?;
        decode(&body)
    }

    #[tracing::instrument(skip(self, query), fields(method = "GET"))]
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).query(query);
        let body = self.execute(path, builder).await?;
        decode(&body)
    }

    #[tracing::instrument(skip(self, payload), fields(method = "POST"))]
    pub async fn post<T, B>(&self, path: &str, payload: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(payload);
        let body = self.execute(path, builder).await?;
        decode(&body)
    }

    #[tracing::instrument(skip(self, payload), fields(method = "PUT"))]
    pub async fn put<T, B>(&self, path: &str, payload: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path).json(payload);
        let body = self.execute(path, builder).await?;
        decode(&body)
    }

    /// DELETE; the response body is ignored.
    #[tracing::instrument(skip(self), fields(method = "DELETE"))]
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.execute(path, self.request(Method::DELETE, path))
            .await
            .map(|_| ())
    }

    /// POST a multipart form of text fields plus file parts.
    #[tracing::instrument(skip(self, fields, files), fields(method = "POST", files = files.len()))]
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<(&'static str, String)>,
        files: Vec<(&'static str, Attachment)>,
    ) -> Result<T, AppError> {
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        for (name, attachment) in files {
            form = form.part(name, file_part(attachment)?);
        }
        let builder = self.request(Method::POST, path).multipart(form);
        let body = self.execute(path, builder).await?;
        decode(&body)
    }

    /// Send and read the body. A 401 clears the stored token.
    async fn execute(&self, path: &str, builder: RequestBuilder) -> Result<String, AppError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "Request failed");
            AppError::network(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;

        if !status.is_success() {
            let err = AppError::from_response(status.as_u16(), &body);
            tracing::warn!(path, status = status.as_u16(), error = %err, "API error");
            if err.is_unauthorized() {
                self.tokens.clear();
            }
            return Err(err);
        }
        Ok(body)
    }
}

fn file_part(attachment: Attachment) -> Result<Part, AppError> {
    let Attachment {
        file_name,
        content_type,
        bytes,
    } = attachment;
    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(&content_type)
        .map_err(|_| {
            let mut fields = HashMap::new();
            fields.insert("arquivo".to_string(), "Tipo de arquivo inválido".to_string());
            AppError::validation(format!("Tipo de arquivo inválido: {content_type}"), fields)
        })
}

/// Parse a success body. An empty body decodes as JSON `null`, so callers
/// that expect `()` or `Option<_>` accept it.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "Unexpected response body");
        AppError::decode(e.to_string())
    })
}
