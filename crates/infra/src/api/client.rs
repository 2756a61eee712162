//! Authorizing API client
//!
//! Attaches the current bearer token to every request and recovers from an
//! expired token with a single-flight refresh followed by one reissue.

use std::sync::Arc;
use std::time::Duration;

use reelview_core::{AccessTokenStore, Navigator};
use reelview_domain::constants::{
    AUTH_REFRESH_PATH, DEFAULT_API_BASE_URL, DEFAULT_SIGN_IN_PATH, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use reelview_domain::{ClientConfig, RefreshResponse};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::errors::ApiError;
use super::refresh::{self, RefreshQueue, Ticket};
use super::request::{ApiRequest, FormPart};
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Backend root, without trailing slash (e.g. "http://localhost:8000")
    pub base_url: String,
    /// Timeout for each request
    pub timeout: Duration,
    pub user_agent: String,
    /// Where the user is sent when the session cannot be recovered
    pub sign_in_path: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_string(),
        }
    }
}

impl From<&ClientConfig> for ApiClientConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            timeout: config.api.timeout(),
            user_agent: config.api.user_agent.clone(),
            sign_in_path: config.routes.sign_in_path.clone(),
        }
    }
}

/// API client bound to one session's token store
pub struct ApiClient {
    http: HttpClient,
    tokens: Arc<dyn AccessTokenStore>,
    navigator: Arc<dyn Navigator>,
    config: ApiClientConfig,
    refresh: RefreshQueue,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the HTTP transport cannot be built
    pub fn new(
        mut config: ApiClientConfig,
        tokens: Arc<dyn AccessTokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {}", e)))?;

        config.base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { http, tokens, navigator, config, refresh: RefreshQueue::new() })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Whether a token refresh is currently in flight
    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_in_flight()
    }

    /// Send `request`, recovering once from an expired access token.
    ///
    /// Returns the final response whatever its status. A 401 on the reissue
    /// is returned as-is; [`ApiClient::execute`] turns it into
    /// `ApiError::Auth`.
    ///
    /// # Errors
    ///
    /// Transport failures, or the refresh error when the token could not be
    /// recovered. In that case the session has already been cleared and the
    /// navigator sent to the sign-in path.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn send(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let response = self.dispatch(request, self.tokens.access_token()).await?;

        if response.status() != StatusCode::UNAUTHORIZED || !request.refreshes_on_unauthorized() {
            return Ok(response);
        }

        debug!("access token rejected, recovering");
        let token = self.recover_token().await?;
        self.dispatch(request, Some(token)).await
    }

    /// [`ApiClient::send`], mapping any non-success status to an error
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; non-success statuses map through
    /// [`ApiError::from_status`].
    pub async fn execute(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let response = self.send(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, request.path(), &body))
    }

    /// Execute a GET request and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(&ApiRequest::get(path)).await?;
        Self::read_json(response).await
    }

    /// Execute a POST request with a JSON body and decode the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::post(path).json(body)?;
        let response = self.execute(&request).await?;
        Self::read_json(response).await
    }

    /// Execute a POST request without body, discarding the response body
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.execute(&ApiRequest::post(path)).await?;
        Ok(())
    }

    /// Execute a multipart POST request and decode the JSON response
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        parts: Vec<FormPart>,
    ) -> Result<T, ApiError> {
        let response = self.execute(&ApiRequest::post(path).multipart(parts)).await?;
        Self::read_json(response).await
    }

    /// Exchange the refresh cookie for a new access token.
    ///
    /// Does not store the token; callers decide what to do with it. Sent in a
    /// single attempt that never enters the 401 recovery path.
    ///
    /// # Errors
    ///
    /// Returns the mapped status error when the backend refuses the refresh.
    pub async fn refresh_access_token(&self) -> Result<String, ApiError> {
        let request = ApiRequest::post(AUTH_REFRESH_PATH);
        let response = self.dispatch(&request, self.tokens.access_token()).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, request.path(), &body));
        }

        let body: RefreshResponse = Self::read_json(response).await?;
        Ok(body.access)
    }

    /// Decode a successful response body
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the body is not valid JSON for `T`
    pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        // 204/205 carry no body
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Client(format!(
                    "No content response ({}), but response type cannot be deserialized from empty body",
                    status.as_u16()
                ))
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Client(format!("Failed to parse response: {}", e)))
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<String>,
    ) -> Result<Response, ApiError> {
        let builder = request.to_builder(&self.http, &self.config.base_url, token.as_deref())?;
        self.http.send(builder).await.map_err(ApiError::from)
    }

    async fn recover_token(&self) -> Result<String, ApiError> {
        let guard = match self.refresh.join() {
            Ticket::Follower(rx) => {
                debug!("refresh in flight, request queued");
                return refresh::wait(rx).await;
            }
            Ticket::Leader(guard) => guard,
        };

        let outcome = self.refresh_access_token().await;
        match &outcome {
            Ok(token) => {
                self.tokens.set_access_token(Some(token.clone()));
                let released = guard.settle(&outcome);
                info!(queued = released, "access token refreshed");
            }
            Err(err) => {
                let released = guard.settle(&outcome);
                warn!(error = %err, queued = released, "token refresh failed, ending session");
                self.tokens.set_access_token(None);
                self.navigator.redirect(&self.config.sign_in_path);
            }
        }
        outcome
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    tokens: Option<Arc<dyn AccessTokenStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the store the bearer token is read from and written to
    pub fn tokens(mut self, tokens: Arc<dyn AccessTokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let tokens =
            self.tokens.ok_or_else(|| ApiError::Config("Token store not set".to_string()))?;
        let navigator =
            self.navigator.ok_or_else(|| ApiError::Config("Navigator not set".to_string()))?;

        ApiClient::new(config, tokens, navigator)
    }
}
