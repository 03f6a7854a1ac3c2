use std::time::Duration;

use sqlx::PgPool;
use thiserror::Error;

use crate::database::models::User;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user already exists")]
    Duplicate,
    #[error("store query timed out")]
    Timeout,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Handle on the user collection. Injected into handlers through app state,
/// read-only after startup, safe to clone per request. Every query runs
/// under a fixed timeout and is never retried.
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
    query_timeout: Duration,
}

const USER_COLUMNS: &str = "id, email, hashed_password, first_name, phone_number, user_address, \
     is_active, date_joined, last_login, longitude, latitude, device_id";

impl UserStore {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let fetch = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool);

        let user = tokio::time::timeout(self.query_timeout, fetch)
            .await
            .map_err(|_| StoreError::Timeout)??;
        Ok(user)
    }

    /// Insert a new user unless the email is already taken.
    ///
    /// Check-then-insert, not a transaction: two concurrent registrations
    /// for the same email can race past the check. The UNIQUE constraint on
    /// email is the backstop, the reported error is still `Duplicate`.
    pub async fn insert_if_absent(&self, user: &User) -> Result<(), StoreError> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(StoreError::Duplicate);
        }

        let insert = sqlx::query(
            r#"
            INSERT INTO users (
                id, email, hashed_password, first_name, phone_number, user_address,
                is_active, date_joined, last_login, longitude, latitude, device_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(&user.first_name)
        .bind(&user.phone_number)
        .bind(&user.user_address)
        .bind(user.is_active)
        .bind(user.date_joined)
        .bind(user.last_login)
        .bind(&user.longitude)
        .bind(&user.latitude)
        .bind(&user.device_id)
        .execute(&self.pool);

        let result = tokio::time::timeout(self.query_timeout, insert)
            .await
            .map_err(|_| StoreError::Timeout)?;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the mutable profile fields and last_login, keyed by email.
    /// Identity and security fields (email, hashed password, is_active,
    /// date_joined) are immutable through this path.
    pub async fn update(&self, user: &User) -> Result<(), StoreError> {
        let update = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, phone_number = $3, user_address = $4,
                longitude = $5, latitude = $6, device_id = $7, last_login = $8
            WHERE email = $1
            "#,
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.phone_number)
        .bind(&user.user_address)
        .bind(&user.longitude)
        .bind(&user.latitude)
        .bind(&user.device_id)
        .bind(user.last_login)
        .execute(&self.pool);

        tokio::time::timeout(self.query_timeout, update)
            .await
            .map_err(|_| StoreError::Timeout)??;
        Ok(())
    }
}
