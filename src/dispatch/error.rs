//! Request and setup errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::binding::ValidationErrors;
use crate::hooks::{BoxError, HookPhase};
use crate::routing::HttpVerb;
use crate::shape::ConversionError;

/// Why a single request failed. Never affects other requests.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),

    #[error("{phase} hook failed: {source}")]
    Hook {
        phase: HookPhase,
        #[source]
        source: BoxError,
    },

    #[error("response serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DispatchError {
    /// Stable error code used in response bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::Conversion(_) => "conversion_error",
            DispatchError::Validation(_) => "validation_error",
            DispatchError::Handler(_) => "handler_error",
            DispatchError::Hook { .. } => "hook_error",
            DispatchError::Serialization(_) => "serialization_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::Conversion(_) | DispatchError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client errors are the caller's fault; everything else is a defect.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            DispatchError::Conversion(err) => json!({
                "code": self.code(),
                "message": err.to_string(),
                "field": err.field,
                "value": err.value,
            }),
            DispatchError::Validation(err) => json!({ "errors": err.errors }),
            _ => json!({
                "code": self.code(),
                "message": self.to_string(),
            }),
        };
        (status, Json(body)).into_response()
    }
}

/// Route table could not be wired into the host router.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("route {verb} {path} is declared more than once")]
    DuplicateRoute { verb: HttpVerb, path: String },

    #[error("invalid API prefix `{0}`")]
    InvalidPrefix(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ValidationFailure;
    use crate::shape::FieldKind;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_conversion_is_a_client_error() {
        let err = DispatchError::from(ConversionError::new("id", "abc", FieldKind::Integer));
        assert!(err.is_client_error());

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert_eq!(body["code"], "conversion_error");
        assert_eq!(body["field"], "id");
        assert_eq!(body["value"], "abc");
    }

    #[tokio::test]
    async fn test_validation_lists_failures() {
        let err = DispatchError::from(ValidationErrors {
            errors: vec![ValidationFailure::new("name", "The name field is required.")],
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert_eq!(body["errors"][0]["field"], "name");
    }

    #[tokio::test]
    async fn test_handler_failure_is_a_server_error() {
        let err = DispatchError::Handler("division by zero".into());
        assert_eq!(err.code(), "handler_error");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body["message"], "handler failed: division by zero");
    }
}
