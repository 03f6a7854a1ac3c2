use axum::body::Bytes;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::validate::{validate, Rule, RuleKind};
use crate::AppState;

use super::decode_body;

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshPayload {
    pub access_token: String,
}

fn rules() -> Vec<Rule<RefreshRequest>> {
    vec![Rule {
        field: "refresh_token",
        kind: RuleKind::Required,
        get: |r| &r.refresh_token,
    }]
}

/// POST /api/refresh-token - trade a valid refresh token for a fresh
/// access token. Refresh tokens only verify under the refresh secret.
pub async fn refresh_token(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiResponse<RefreshPayload>, ApiError> {
    let payload: RefreshRequest = decode_body(&body)?;
    validate(&payload, &rules())?;

    let subject = state.tokens.verify_refresh(&payload.refresh_token)?;
    let access_token = state.tokens.issue_access(&subject)?;

    Ok(ApiResponse::success(RefreshPayload { access_token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_refresh_token_reports_required() {
        let payload = RefreshRequest {
            refresh_token: String::new(),
        };
        let failure = validate(&payload, &rules()).unwrap_err();
        assert_eq!(failure.message, "refresh_token is required");
    }
}
