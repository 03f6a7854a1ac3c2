pub mod user;

pub use user::{AuthPayload, User, UserProfile};
