use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::TokenPair;

/// Stored user row. Deliberately not `Serialize`: the hashed password must
/// never leave the process, so every response goes through a sanitized view.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub first_name: String,
    pub phone_number: String,
    pub user_address: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub longitude: String,
    pub latitude: String,
    pub device_id: String,
}

impl User {
    /// Fresh user as created at registration: active, joined now.
    pub fn new(email: &str, first_name: &str, device_id: &str, hashed_password: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            hashed_password,
            first_name: first_name.to_string(),
            phone_number: String::new(),
            user_address: String::new(),
            is_active: true,
            date_joined: now,
            last_login: now,
            longitude: String::new(),
            latitude: String::new(),
            device_id: device_id.to_string(),
        }
    }

    /// Sanitized view for profile responses. No password field exists here.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            phone_number: self.phone_number.clone(),
            user_address: self.user_address.clone(),
            is_active: self.is_active,
            date_joined: self.date_joined,
            last_login: self.last_login,
            longitude: self.longitude.clone(),
            latitude: self.latitude.clone(),
            device_id: self.device_id.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub email: String,
    pub first_name: String,
    pub phone_number: String,
    pub user_address: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub longitude: String,
    pub latitude: String,
    pub device_id: String,
}

/// Payload returned by register and login: account summary plus the
/// freshly issued token pair.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub email: String,
    pub first_name: String,
    pub phone_number: String,
    pub user_address: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthPayload {
    pub fn new(user: &User, pair: TokenPair) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            phone_number: user.phone_number.clone(),
            user_address: user.user_address.clone(),
            is_active: user.is_active,
            date_joined: user.date_joined,
            last_login: user.last_login,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}
