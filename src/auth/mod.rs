//! Credential handling: one-way password hashing and signed session tokens.

pub mod password;
pub mod tokens;

pub use password::{hash_password, verify_password};
pub use tokens::{TokenIssuer, TokenPair};
