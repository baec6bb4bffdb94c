// Types persisted to disk
pub mod common;

mod client;
mod error;

pub use client::{AuthManager, Credentials, Settings, TokenStore};
pub use common::StoredToken;
pub use error::AuthError;
