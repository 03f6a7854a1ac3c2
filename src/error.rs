// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::password::PasswordError;
use crate::auth::tokens::TokenError;
use crate::database::users::StoreError;
use crate::validate::ValidationFailure;

/// HTTP API error with appropriate status codes and client-safe messages.
///
/// The failure envelope is `{"error": "<msg>"}` except for 405, which keeps
/// the original contract's `{"message": "Method Not allowed"}` body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    MethodNotAllowed,
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
            ApiError::MethodNotAllowed => "Method Not allowed",
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ApiError::MethodNotAllowed => json!({ "message": self.message() }),
            _ => json!({ "error": self.message() }),
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(failure: ValidationFailure) -> Self {
        // More than one failing field collapses to the generic message so the
        // response never reveals which combination of fields was wrong.
        if failure.multiple {
            ApiError::bad_request("Invalid Payload")
        } else {
            ApiError::bad_request(failure.message)
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => ApiError::bad_request("User already exists, please login"),
            StoreError::Timeout => {
                tracing::error!("store query timed out");
                ApiError::internal("Something went wrong")
            }
            StoreError::Sqlx(e) => {
                tracing::error!("store query failed: {}", e);
                ApiError::internal("Something went wrong")
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => ApiError::unauthorized("Token has expired, please login"),
            TokenError::Invalid(reason) => {
                tracing::warn!("token rejected: {}", reason);
                ApiError::unauthorized("Invalid Token")
            }
            TokenError::EmptySubject | TokenError::Signing(_) => {
                tracing::error!("token issuance failed: {}", err);
                ApiError::internal("Something went wrong")
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => ApiError::bad_request("Email/Password is incorrect"),
            PasswordError::EmptyPassword | PasswordError::Hash(_) => {
                tracing::error!("password hashing failed: {}", err);
                ApiError::internal("Something went wrong")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_not_allowed_keeps_message_key() {
        let body = ApiError::MethodNotAllowed.to_json();
        assert_eq!(body["message"], "Method Not allowed");
        assert!(body.get("error").is_none());
    }

    #[test]
    fn failure_envelope_uses_error_key() {
        let body = ApiError::bad_request("Invalid Payload").to_json();
        assert_eq!(body["error"], "Invalid Payload");
    }

    #[test]
    fn multi_field_validation_collapses_to_generic_message() {
        let failure = ValidationFailure {
            message: "email should be a valid email address".to_string(),
            multiple: true,
        };
        let err = ApiError::from(failure);
        assert_eq!(err.message(), "Invalid Payload");
    }
}
