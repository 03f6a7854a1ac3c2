use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Claim set carried by both access and refresh tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub authorized: bool,
    pub client: String,
    pub exp: i64,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("cannot issue a token for an empty subject")]
    EmptySubject,
    #[error("token has expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Issues and verifies the two session tokens. Access and refresh tokens
/// are signed with distinct secrets and distinct lifetimes; a token minted
/// for one role never verifies under the other.
#[derive(Clone)]
pub struct TokenIssuer {
    access_secret: String,
    refresh_secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(
            security.access_signing_key.clone(),
            security.refresh_signing_key.clone(),
            Duration::minutes(security.access_token_ttl_mins),
            Duration::hours(security.refresh_token_ttl_hours),
        )
    }

    pub fn issue_access(&self, subject: &str) -> Result<String, TokenError> {
        sign(subject, &self.access_secret, self.access_ttl)
    }

    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: sign(subject, &self.access_secret, self.access_ttl)?,
            refresh_token: sign(subject, &self.refresh_secret, self.refresh_ttl)?,
        })
    }

    /// Verify an access token and return its subject.
    pub fn verify_access(&self, token: &str) -> Result<String, TokenError> {
        verify(token, &self.access_secret)
    }

    /// Verify a refresh token and return its subject.
    pub fn verify_refresh(&self, token: &str) -> Result<String, TokenError> {
        verify(token, &self.refresh_secret)
    }
}

fn sign(subject: &str, secret: &str, ttl: Duration) -> Result<String, TokenError> {
    if subject.is_empty() {
        return Err(TokenError::EmptySubject);
    }

    let claims = Claims {
        authorized: true,
        client: subject.to_string(),
        exp: (Utc::now() + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

fn verify(token: &str, secret: &str) -> Result<String, TokenError> {
    // HS256 pinned: a token claiming any other algorithm family is rejected
    // outright, expiry gets its own error kind so callers can word the 401.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
    })?;

    Ok(data.claims.client)
}
