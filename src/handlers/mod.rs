use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub mod login;
pub mod profile;
pub mod refresh;
pub mod register;

pub use login::login;
pub use profile::{get_profile, patch_profile, put_profile};
pub use refresh::refresh_token;
pub use register::register;

/// Decode a JSON request body. An empty body normalizes to the generic
/// "Invalid Payload"; any other decode error surfaces its literal message,
/// matching the existing protocol.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    if body.is_empty() {
        return Err(ApiError::bad_request("Invalid Payload"));
    }

    serde_json::from_slice(body).map_err(|e| {
        if e.is_eof() {
            return ApiError::bad_request("Invalid Payload");
        }
        tracing::warn!("failed to decode request body: {}", e);
        ApiError::bad_request(e.to_string())
    })
}

/// Method fallback shared by every declared route.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Router fallback for routes outside the declared set.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
