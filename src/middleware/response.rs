use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::json;

/// Success envelope: `{"message": "success", "data": <payload>}`.
///
/// Failure responses use an `error` key instead (see `ApiError`); the
/// mismatched key naming between the two envelopes is part of the existing
/// wire contract and is kept for compatibility.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize>(pub T);

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self(data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data = match serde_json::to_value(&self.0) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Something went wrong" })),
                )
                    .into_response();
            }
        };

        Json(json!({ "message": "success", "data": data })).into_response()
    }
}
