use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Serialize, Deserialize};

use crate::consts::{DEFAULT_SCHEMA_PATH, ESI_SWAGGER_URI};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpScheme {
    Http,
    Https
}

impl Default for HttpScheme {
    #[inline]
    fn default() -> Self {
        Self::Https
    }
}

impl HttpScheme {
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Http  => "http",
            Self::Https => "https"
        }
    }
}

/// Application token issued by the proxy
///
/// Base64 of the `<app id>:<secret>` pair. Presented as a bearer
/// credential on every request; there is no OAuth flow behind it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppToken(String);

impl AppToken {
    /// Wrap an already encoded token
    #[inline]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Encode an application id and secret pair
    pub fn encode(app_id: u64, secret: impl AsRef<str>) -> Self {
        Self(STANDARD.encode(format!("{}:{}", app_id, secret.as_ref())))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything needed to reach the proxy on behalf of one character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub scheme: HttpScheme,

    /// Domain the proxy is served from, e.g. `neucore.tld`
    pub domain: String,

    pub app_token: AppToken,

    /// EVE character with a stored ESI token in the proxy
    pub character_id: u64,

    /// EVE login to take the ESI token from; the proxy
    /// uses its default login when this is not set
    #[serde(default)]
    pub eve_login: Option<String>,

    /// Where the swagger definition file is fetched from
    #[serde(default = "default_schema_uri")]
    pub schema_uri: String,

    /// Where the patched definition file is stored
    #[serde(default = "default_schema_path")]
    pub schema_path: PathBuf
}

impl ProxyConfig {
    pub fn new(domain: impl Into<String>, app_token: AppToken, character_id: u64) -> Self {
        Self {
            scheme: HttpScheme::default(),
            domain: domain.into(),
            app_token,
            character_id,
            eve_login: None,
            schema_uri: default_schema_uri(),
            schema_path: default_schema_path()
        }
    }

    #[inline]
    pub fn with_scheme(mut self, scheme: HttpScheme) -> Self {
        self.scheme = scheme;

        self
    }

    #[inline]
    pub fn with_eve_login(mut self, eve_login: impl Into<String>) -> Self {
        self.eve_login = Some(eve_login.into());

        self
    }

    /// `<scheme>://<domain>` without any path
    #[inline]
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme.as_str(), self.domain)
    }
}

fn default_schema_uri() -> String {
    ESI_SWAGGER_URI.to_string()
}

fn default_schema_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCHEMA_PATH)
}

#[test]
fn test_app_token_encode() {
    assert_eq!(AppToken::encode(1, "secret").as_str(), "MTpzZWNyZXQ=");
}
