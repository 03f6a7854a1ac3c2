use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;

use crate::error::ApiError;

pub mod response;
pub mod session;
pub mod static_token;

pub use response::ApiResponse;
pub use session::{user_session_gate, CurrentUser};
pub use static_token::static_token_gate;

/// Pull the credential out of the Authorization header. Format is
/// `"<scheme> <token>"`; the scheme is ignored, only the second part
/// matters. Header shape problems are Forbidden, not Unauthorized.
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::forbidden("Token not passed"))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::forbidden("Invalid token format"))?;

    let parts: Vec<&str> = value.split(' ').collect();
    if parts.len() < 2 {
        return Err(ApiError::forbidden("Invalid token format"));
    }
    Ok(parts[1])
}

/// Permissive CORS headers set by both gates once a request is allowed
/// through, mirroring the frontend-origin contract of the original service.
fn allow_cors(response: &mut Response) {
    let headers = response.headers_mut();
    headers.insert(
        "access-control-allow-origin",
        HeaderValue::from_static("*"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("Content-Type"),
    );
}
