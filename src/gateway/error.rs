//! Gateway-originated failures
//!
//! Only failures of the gateway itself map here. A backend answering with
//! its own error status is relayed untouched and never becomes a
//! `ProxyError`.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    /// The configured backend URL cannot be turned into a request target
    #[error("Invalid proxy target {url}: {reason}")]
    InvalidTarget { url: String, reason: String },

    /// The outbound request cannot be constructed
    #[error("Failed to create request {method} {url}: {source}")]
    BuildRequest {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Connect, DNS, timeout or reset while talking to the backend
    #[error("Failed to send request {method} {url}: {source}")]
    Dispatch {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ProxyError {
    pub fn http_status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidTarget { .. } | ProxyError::BuildRequest { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ProxyError::Dispatch { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Client-facing body; internal details stay in the logs
    pub fn public_message(&self) -> &'static str {
        match self {
            ProxyError::InvalidTarget { .. } | ProxyError::BuildRequest { .. } => {
                "Internal server error"
            }
            ProxyError::Dispatch { .. } => "Service unavailable",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.http_status(), self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_target_maps_to_500() {
        let err = ProxyError::InvalidTarget {
            url: "::".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
        assert_eq!(
            err.to_string(),
            "Invalid proxy target ::: relative URL without a base"
        );
    }

    fn builder_error() -> reqwest::Error {
        reqwest::Client::new().get("not a url").build().unwrap_err()
    }

    #[test]
    fn test_build_and_dispatch_status() {
        let build = ProxyError::BuildRequest {
            method: Method::POST,
            url: "http://orders/orders".to_string(),
            source: builder_error(),
        };
        assert_eq!(build.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(build.to_string().starts_with("Failed to create request POST http://orders/orders"));

        let dispatch = ProxyError::Dispatch {
            method: Method::GET,
            url: "http://orders/orders/1".to_string(),
            source: builder_error(),
        };
        assert_eq!(dispatch.http_status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(dispatch.public_message(), "Service unavailable");
    }

    #[tokio::test]
    async fn test_into_response_hides_details() {
        let err = ProxyError::InvalidTarget {
            url: "postgres://secret".to_string(),
            reason: "nope".to_string(),
        };

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Internal server error");
    }
}
