//! Auth configuration types

use crate::config::TapConfig;
use chrono::{DateTime, Utc};

/// Default Google OAuth2 token endpoint
pub const GOOGLE_TOKEN_URL: &str = "https://www.googleapis.com/oauth2/v4/token";

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Static bearer token
    Bearer {
        /// The bearer token
        token: String,
    },

    /// OAuth2 Refresh Token flow
    Oauth2Refresh {
        /// Token endpoint URL
        token_url: String,
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: String,
        /// Refresh token
        refresh_token: String,
    },
}

impl AuthConfig {
    /// Pick the auth flow for a tap config.
    ///
    /// A static `access_token` wins over the refresh-token credentials.
    pub fn from_tap_config(config: &TapConfig) -> Self {
        if let Some(token) = &config.access_token {
            return Self::Bearer {
                token: token.clone(),
            };
        }

        match (
            &config.oauth_client_id,
            &config.oauth_client_secret,
            &config.refresh_token,
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => Self::Oauth2Refresh {
                token_url: config
                    .token_url
                    .clone()
                    .unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
                refresh_token: refresh_token.clone(),
            },
            _ => Self::None,
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}
