//! Authentication module
//!
//! Supports: Bearer token, OAuth2 refresh token
//!
//! The `Authenticator` caches the OAuth2 access token and refreshes it
//! shortly before it expires.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, GOOGLE_TOKEN_URL};
