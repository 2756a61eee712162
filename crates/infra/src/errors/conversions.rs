//! Conversions from external infrastructure errors into domain errors.

use reelview_domain::ReelviewError;
use reqwest::Error as HttpError;

use crate::api::ApiError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ReelviewError);

impl From<InfraError> for ReelviewError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ReelviewError> for InfraError {
    fn from(value: ReelviewError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoReelviewError {
    fn into_reelview(self) -> ReelviewError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ReelviewError */
/* -------------------------------------------------------------------------- */

impl IntoReelviewError for HttpError {
    fn into_reelview(self) -> ReelviewError {
        if self.is_timeout() {
            return ReelviewError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ReelviewError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return ReelviewError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => ReelviewError::Auth(message),
                404 => ReelviewError::NotFound(message),
                400..=499 => ReelviewError::InvalidInput(message),
                _ => ReelviewError::Network(message),
            };
        }

        ReelviewError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_reelview())
    }
}

/* -------------------------------------------------------------------------- */
/* ApiError → ReelviewError */
/* -------------------------------------------------------------------------- */

impl From<ApiError> for ReelviewError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::Client(message) => Self::InvalidInput(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::RateLimit(message)
            | ApiError::Server(message)
            | ApiError::Network(message) => Self::Network(message),
            ApiError::Cancelled => Self::Internal("operation cancelled".into()),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: ReelviewError = InfraError::from(error).into();
        match mapped {
            ReelviewError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[test]
    fn api_errors_map_to_domain_errors() {
        assert_eq!(
            ReelviewError::from(ApiError::Auth("expired".into())),
            ReelviewError::Auth("expired".into())
        );
        assert_eq!(
            ReelviewError::from(ApiError::Client("Invalid credentials".into())),
            ReelviewError::InvalidInput("Invalid credentials".into())
        );
        assert_eq!(
            ReelviewError::from(ApiError::Network("HTTP request timed out".into())),
            ReelviewError::Network("HTTP request timed out".into())
        );
        assert!(matches!(ReelviewError::from(ApiError::Cancelled), ReelviewError::Internal(_)));
    }
}
