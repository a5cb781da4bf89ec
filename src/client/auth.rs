use std::time::{Duration, SystemTime};

use crate::config::AppToken;

/// Static bearer credential for the proxy
///
/// The proxy issues app tokens out of band, so there is no OAuth flow
/// here: the token is wrapped with a declared lifetime and an empty
/// refresh token, and nothing ever refreshes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppAuthentication {
    access_token: AppToken,
    expires_at: SystemTime,
    refresh_token: String
}

impl AppAuthentication {
    /// Lifetime declared for tokens that never actually expire server-side
    pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(3600);

    #[inline]
    pub fn static_token(access_token: AppToken) -> Self {
        Self::with_lifetime(access_token, Self::DEFAULT_LIFETIME)
    }

    pub fn with_lifetime(access_token: AppToken, lifetime: Duration) -> Self {
        Self {
            access_token,
            expires_at: SystemTime::now() + lifetime,
            refresh_token: String::new()
        }
    }

    #[inline]
    pub fn access_token(&self) -> &AppToken {
        &self.access_token
    }

    #[inline]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn is_expired(&self) -> bool {
        SystemTime::now() >= self.expires_at
    }

    /// Value of the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.access_token.as_str())
    }
}
