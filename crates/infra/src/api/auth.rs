//! Auth endpoints
//!
//! Typed calls for sign-in, sign-up, token refresh, sign-out and profile
//! lookup. `AuthApi` is also the [`AuthBackend`] the session manager drives.

use std::sync::Arc;

use async_trait::async_trait;
use reelview_core::AuthBackend;
use reelview_domain::constants::{
    AUTH_GOOGLE_LOGIN_PATH, AUTH_LOGIN_PATH, AUTH_LOGOUT_PATH, AUTH_ME_PATH, AUTH_REGISTER_PATH,
    LOGIN_FAILED_MESSAGE, SIGNUP_FAILED_MESSAGE,
};
use reelview_domain::{
    GoogleLoginResponse, LoginRequest, LoginResponse, RegisterResponse, RegistrationForm,
    ReelviewError, UserProfile,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::{ApiRequest, FormPart};

/// Form field carrying the optional avatar
const PROFILE_IMAGE_FIELD: &str = "file";

/// Auth endpoint adapter over [`ApiClient`]
///
/// None of these calls touch session state; callers decide what to do with
/// the returned tokens.
#[derive(Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Exchange credentials for an access token and profile.
    ///
    /// # Errors
    ///
    /// The backend's `detail` message, or a generic sign-in failure message.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest { email: email.to_string(), password: password.to_string() };
        let request = ApiRequest::post(AUTH_LOGIN_PATH).json(&body)?.without_token_refresh();

        let response: LoginResponse = self.interactive(&request, LOGIN_FAILED_MESSAGE).await?;
        info!("signed in");
        Ok(response)
    }

    /// Create an account from the sign-up form.
    ///
    /// # Errors
    ///
    /// `ApiError::Client` without any network call when the form is invalid
    /// (e.g. passwords differ); otherwise the backend's `detail` message or a
    /// generic sign-up failure message.
    #[instrument(skip(self, form))]
    pub async fn register(&self, form: &RegistrationForm) -> Result<RegisterResponse, ApiError> {
        form.validate()?;

        let mut parts: Vec<FormPart> =
            form.text_fields().into_iter().map(|(name, value)| FormPart::text(name, value)).collect();
        if let Some(image) = &form.image {
            parts.push(FormPart::File {
                name: PROFILE_IMAGE_FIELD.to_string(),
                file_name: image.file_name.clone(),
                content_type: image.content_type.clone(),
                bytes: image.bytes.clone(),
            });
        }

        let request = ApiRequest::post(AUTH_REGISTER_PATH).multipart(parts).without_token_refresh();
        let response: RegisterResponse = self.interactive(&request, SIGNUP_FAILED_MESSAGE).await?;
        info!("account created");
        Ok(response)
    }

    /// New access token from the refresh cookie
    pub async fn refresh(&self) -> Result<String, ApiError> {
        self.client.refresh_access_token().await
    }

    /// Invalidate the refresh cookie server-side
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.post_empty(AUTH_LOGOUT_PATH).await
    }

    /// Profile of the current access token
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.client.get_json(AUTH_ME_PATH).await
    }

    /// Authorization URL of the Google sign-in flow
    pub async fn google_login_url(&self) -> Result<String, ApiError> {
        let response: GoogleLoginResponse = self.client.get_json(AUTH_GOOGLE_LOGIN_PATH).await?;
        Ok(response.url)
    }

    async fn interactive<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let response = self.client.send(request).await.map_err(|err| {
            warn!(error = %err, "auth request failed");
            match err {
                ApiError::Network(_) => ApiError::Network(fallback.to_string()),
                other => other,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, "auth request rejected");
            return Err(ApiError::user_facing(status, &body, fallback));
        }

        ApiClient::read_json(response).await
    }
}

#[async_trait]
impl AuthBackend for AuthApi {
    async fn refresh(&self) -> Result<String, ReelviewError> {
        AuthApi::refresh(self).await.map_err(ReelviewError::from)
    }

    async fn current_user(&self) -> Result<UserProfile, ReelviewError> {
        AuthApi::current_user(self).await.map_err(ReelviewError::from)
    }

    async fn logout(&self) -> Result<(), ReelviewError> {
        AuthApi::logout(self).await.map_err(ReelviewError::from)
    }
}
