//! Replayable request descriptions
//!
//! A request that hits an expired token is sent a second time with the new
//! token, so it is kept as plain data and turned into a reqwest builder per
//! attempt. Multipart forms in particular cannot be cloned once built.

use std::fmt;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;

use reelview_domain::constants::AUTH_REFRESH_PATH;

use super::errors::ApiError;
use crate::http::HttpClient;

/// Request payload
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// One field of a multipart form
#[derive(Clone)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file_name: String, content_type: Option<String>, bytes: Vec<u8> },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text { name: name.into(), value: value.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

// Field values can be passwords; only names are printed.
impl fmt::Debug for FormPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { name, .. } => f.debug_struct("Text").field("name", name).finish(),
            Self::File { name, file_name, bytes, .. } => f
                .debug_struct("File")
                .field("name", name)
                .field("file_name", file_name)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

/// Method, path and body of a backend call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: RequestBody,
    refresh_on_unauthorized: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: RequestBody::Empty, refresh_on_unauthorized: true }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a JSON body
    ///
    /// # Errors
    /// Returns `ApiError::Client` if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Client(format!("Failed to serialize body: {}", e)))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Attach a multipart form body
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Let a 401 reach the caller as-is. Used for credential exchanges,
    /// where 401 means wrong credentials rather than an expired token.
    pub fn without_token_refresh(mut self) -> Self {
        self.refresh_on_unauthorized = false;
        self
    }

    /// Whether a 401 on this request may start a token refresh. Never true
    /// for the refresh endpoint itself.
    pub fn refreshes_on_unauthorized(&self) -> bool {
        let endpoint = self.path.split(['?', '#']).next().unwrap_or_default();
        self.refresh_on_unauthorized && endpoint != AUTH_REFRESH_PATH
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Build a fresh reqwest builder carrying `token` as bearer credentials.
    pub(crate) fn to_builder(
        &self,
        http: &HttpClient,
        base_url: &str,
        token: Option<&str>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}{}", base_url, self.path);
        let mut builder = http.request(self.method.clone(), url);

        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        builder = match &self.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        Ok(builder)
    }
}

fn build_form(parts: &[FormPart]) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File { name, file_name, content_type, bytes } => {
                let mut file = Part::bytes(bytes.clone()).file_name(file_name.clone());
                if let Some(content_type) = content_type {
                    file = file.mime_str(content_type).map_err(|e| {
                        ApiError::Client(format!("Invalid content type {content_type}: {e}"))
                    })?;
                }
                form.part(name.clone(), file)
            }
        };
    }
    Ok(form)
}
