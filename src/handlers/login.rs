use axum::body::Bytes;
use axum::extract::State;
use chrono::Utc;
use serde::Deserialize;

use crate::auth::verify_password;
use crate::database::models::AuthPayload;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::validate::{validate, Rule, RuleKind};
use crate::AppState;

use super::decode_body;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn rules() -> Vec<Rule<LoginRequest>> {
    vec![
        Rule {
            field: "email",
            kind: RuleKind::Required,
            get: |r| &r.email,
        },
        Rule {
            field: "email",
            kind: RuleKind::Email,
            get: |r| &r.email,
        },
        Rule {
            field: "password",
            kind: RuleKind::Required,
            get: |r| &r.password,
        },
    ]
}

/// POST /api/login
///
/// Unknown email and wrong password answer the same generic 400 so the
/// response never reveals which credential failed.
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiResponse<AuthPayload>, ApiError> {
    let payload: LoginRequest = decode_body(&body)?;
    validate(&payload, &rules())?;

    let mut user = state
        .store
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::bad_request("Email/Password is incorrect"))?;

    verify_password(&payload.password, &user.hashed_password)
        .map_err(|_| ApiError::bad_request("Email/Password is incorrect"))?;

    user.last_login = Utc::now();
    state.store.update(&user).await?;

    let pair = state.tokens.issue_pair(&user.email)?;

    Ok(ApiResponse::success(AuthPayload::new(&user, pair)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_email_reports_required() {
        let payload = LoginRequest {
            email: String::new(),
            password: "pw".to_string(),
        };
        let failure = validate(&payload, &rules()).unwrap_err();
        assert_eq!(failure.message, "email is required");
    }

    #[test]
    fn valid_credentials_shape_passes() {
        let payload = LoginRequest {
            email: "uche@gmail.com".to_string(),
            password: "pw".to_string(),
        };
        assert!(validate(&payload, &rules()).is_ok());
    }
}
