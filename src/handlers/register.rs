use axum::body::Bytes;
use axum::extract::State;
use serde::Deserialize;

use crate::auth::hash_password;
use crate::database::models::{AuthPayload, User};
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::validate::{validate, Rule, RuleKind};
use crate::AppState;

use super::decode_body;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub first_name: String,
}

fn rules() -> Vec<Rule<RegisterRequest>> {
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
        Rule {
            field: "confirm_password",
            kind: RuleKind::EqField {
                field: "password",
                get: |r| &r.password,
            },
            get: |r| &r.confirm_password,
        },
    ]
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiResponse<AuthPayload>, ApiError> {
    let payload: RegisterRequest = decode_body(&body)?;
    validate(&payload, &rules())?;

    let hashed = hash_password(&payload.password)?;
    let user = User::new(&payload.email, &payload.first_name, &payload.device_id, hashed);

    state.store.insert_if_absent(&user).await?;

    let pair = state.tokens.issue_pair(&user.email)?;
    tracing::info!("registered new user");

    Ok(ApiResponse::success(AuthPayload::new(&user, pair)))
}
