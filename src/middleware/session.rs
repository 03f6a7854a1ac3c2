use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::database::models::User;
use crate::error::ApiError;
use crate::AppState;

/// The user loaded by the session gate, attached to the request for
/// downstream handlers.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Per-user identity gate protecting profile operations.
///
/// Header-shape problems are 403 like the static gate; a present but
/// expired or otherwise invalid access token is 401, with expiry worded
/// separately so clients know to re-login. A token whose subject no longer
/// exists in the store is also 401.
pub async fn user_session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = super::bearer_token(request.headers())?;

    let subject = state.tokens.verify_access(token)?;

    let user = state
        .store
        .find_by_email(&subject)
        .await?
        .ok_or_else(|| {
            tracing::warn!("session token for unknown user");
            ApiError::unauthorized("User does not exist")
        })?;

    request.extensions_mut().insert(CurrentUser(user));

    let mut response = next.run(request).await;
    super::allow_cors(&mut response);
    Ok(response)
}
