use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("cannot hash an empty password")]
    EmptyPassword,
    #[error("password does not match")]
    Mismatch,
    #[error("hashing failed: {0}")]
    Hash(String),
}

/// Hash a password with bcrypt. Empty input is rejected before it ever
/// reaches the hasher.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::EmptyPassword);
    }
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a password against a stored bcrypt hash. Succeeds silently on a
/// match; any mismatch or malformed hash is an error.
pub fn verify_password(password: &str, hashed: &str) -> Result<(), PasswordError> {
    match bcrypt::verify(password, hashed) {
        Ok(true) => Ok(()),
        Ok(false) => Err(PasswordError::Mismatch),
        Err(e) => Err(PasswordError::Hash(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_empty_password_fails() {
        assert!(matches!(
            hash_password(""),
            Err(PasswordError::EmptyPassword)
        ));
    }

    #[test]
    fn hash_then_verify_round_trips() {
        let hashed = hash_password("myStrongPassword").expect("hash");
        assert!(verify_password("myStrongPassword", &hashed).is_ok());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hashed = hash_password("myStrongPassword").expect("hash");
        assert!(matches!(
            verify_password("notThePassword", &hashed),
            Err(PasswordError::Mismatch)
        ));
    }
}
