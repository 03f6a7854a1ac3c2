use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::AppState;

/// Coarse "is this a known frontend" gate: the bearer credential must
/// exactly equal the preconfigured shared token. This is not per-user auth;
/// any shape or value problem answers 403.
pub async fn static_token_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = super::bearer_token(request.headers())?;

    if token != state.static_token {
        return Err(ApiError::forbidden("Invalid token passed"));
    }

    let mut response = next.run(request).await;
    super::allow_cors(&mut response);
    Ok(response)
}
