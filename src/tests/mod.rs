use crate::prelude::*;

mod client;

#[test]
fn test_config_deserialization() {
    let config = serde_json::from_value::<ProxyConfig>(serde_json::json!({
        "domain": "neucore.tld",
        "app_token": "MTpzZWNyZXQ=",
        "character_id": 96061222
    })).unwrap();

    assert_eq!(config.scheme, HttpScheme::Https);
    assert_eq!(config.domain, "neucore.tld");
    assert_eq!(config.app_token, AppToken::encode(1, "secret"));
    assert_eq!(config.character_id, 96061222);
    assert_eq!(config.eve_login, None);
    assert_eq!(config.schema_uri, ESI_SWAGGER_URI);
    assert_eq!(config.schema_path.to_str(), Some(DEFAULT_SCHEMA_PATH));
}

#[test]
fn test_static_authentication() {
    let authentication = AppAuthentication::static_token(AppToken::encode(1, "secret"));

    assert!(!authentication.is_expired());
    assert!(authentication.refresh_token().is_empty());
    assert_eq!(authentication.header_value(), "Bearer MTpzZWNyZXQ=");

    let expired = AppAuthentication::with_lifetime(
        AppToken::new("token"),
        std::time::Duration::from_secs(0)
    );

    assert!(expired.is_expired());
}
