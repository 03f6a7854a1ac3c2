use axum::body::Bytes;
use axum::extract::State;
use axum::Extension;
use serde::Deserialize;

use crate::database::models::{User, UserProfile};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, CurrentUser};
use crate::AppState;

use super::decode_body;

/// Fields a client may change through the profile endpoint. Email,
/// password, is_active and the timestamps are always forced back to the
/// stored values: identity and security state is immutable here.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub user_address: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub device_id: String,
}

/// GET /api/profile
pub async fn get_profile(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResponse<UserProfile> {
    ApiResponse::success(user.profile())
}

/// PATCH /api/profile - merge update: empty incoming fields keep the
/// stored value.
pub async fn patch_profile(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    body: Bytes,
) -> Result<ApiResponse<UserProfile>, ApiError> {
    let update: ProfileUpdate = decode_body(&body)?;
    let merged = merge_patch(user, update);
    state.store.update(&merged).await?;
    Ok(ApiResponse::success(merged.profile()))
}

/// PUT /api/profile - full replace of the mutable fields, no per-field
/// fallback.
pub async fn put_profile(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    body: Bytes,
) -> Result<ApiResponse<UserProfile>, ApiError> {
    let update: ProfileUpdate = decode_body(&body)?;
    let replaced = replace_fields(user, update);
    state.store.update(&replaced).await?;
    Ok(ApiResponse::success(replaced.profile()))
}

fn merge_patch(mut user: User, update: ProfileUpdate) -> User {
    if !update.first_name.is_empty() {
        user.first_name = update.first_name;
    }
    if !update.phone_number.is_empty() {
        user.phone_number = update.phone_number;
    }
    if !update.user_address.is_empty() {
        user.user_address = update.user_address;
    }
    if !update.longitude.is_empty() {
        user.longitude = update.longitude;
    }
    if !update.latitude.is_empty() {
        user.latitude = update.latitude;
    }
    if !update.device_id.is_empty() {
        user.device_id = update.device_id;
    }
    user
}

fn replace_fields(mut user: User, update: ProfileUpdate) -> User {
    user.first_name = update.first_name;
    user.phone_number = update.phone_number;
    user.user_address = update.user_address;
    user.longitude = update.longitude;
    user.latitude = update.latitude;
    user.device_id = update.device_id;
    user
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_user() -> User {
        let mut user = User::new(
            "uche@gmail.com",
            "Uche",
            "device-1",
            "hash".to_string(),
        );
        user.phone_number = "0800".to_string();
        user.user_address = "12 Old Street".to_string();
        user.longitude = "3.37".to_string();
        user.latitude = "6.52".to_string();
        user
    }

    #[test]
    fn patch_with_one_field_keeps_the_rest() {
        let update = ProfileUpdate {
            first_name: "New".to_string(),
            ..ProfileUpdate::default()
        };
        let merged = merge_patch(stored_user(), update);
        assert_eq!(merged.first_name, "New");
        assert_eq!(merged.phone_number, "0800");
        assert_eq!(merged.user_address, "12 Old Street");
        assert_eq!(merged.longitude, "3.37");
        assert_eq!(merged.latitude, "6.52");
        assert_eq!(merged.device_id, "device-1");
    }

    #[test]
    fn patch_never_touches_identity_fields() {
        let before = stored_user();
        let update = ProfileUpdate {
            first_name: "New".to_string(),
            ..ProfileUpdate::default()
        };
        let merged = merge_patch(before.clone(), update);
        assert_eq!(merged.email, before.email);
        assert_eq!(merged.hashed_password, before.hashed_password);
        assert_eq!(merged.is_active, before.is_active);
        assert_eq!(merged.date_joined, before.date_joined);
        assert_eq!(merged.last_login, before.last_login);
    }

    #[test]
    fn put_replaces_mutable_fields_without_fallback() {
        let update = ProfileUpdate {
            first_name: "New".to_string(),
            ..ProfileUpdate::default()
        };
        let replaced = replace_fields(stored_user(), update);
        assert_eq!(replaced.first_name, "New");
        assert_eq!(replaced.phone_number, "");
        assert_eq!(replaced.user_address, "");
        assert_eq!(replaced.device_id, "");
    }

    #[test]
    fn put_keeps_identity_fields() {
        let before = stored_user();
        let replaced = replace_fields(before.clone(), ProfileUpdate::default());
        assert_eq!(replaced.email, before.email);
        assert_eq!(replaced.hashed_password, before.hashed_password);
        assert_eq!(replaced.is_active, before.is_active);
    }
}
