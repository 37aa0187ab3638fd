//! Unit tests for config module.

use super::*;

#[test]
fn test_parse_config() {
    let toml_content = r#"
base_url = "https://pcdn.example.com/"
timeout_secs = 15
utc_offset_secs = 28800

[credentials]
cp = "my-cp"
seckey = "my-secret"
"#;

    let config = ClientConfig::parse(toml_content).expect("should parse");
    assert_eq!(config.base_url, "https://pcdn.example.com/");
    assert_eq!(config.resolved_base_url(), "https://pcdn.example.com");
    assert_eq!(config.credentials.cp, "my-cp");
    assert_eq!(config.credentials.seckey, "my-secret");
    assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    assert_eq!(
        config.utc_offset().unwrap(),
        FixedOffset::east_opt(28800)
    );
}

#[test]
fn test_parse_minimal_config() {
    let toml_content = r#"
[credentials]
cp = "cp"
seckey = "testSeckey"
"#;

    let config = ClientConfig::parse(toml_content).expect("should parse");
    assert!(config.base_url.is_empty());
    assert_eq!(config.resolved_base_url(), DEFAULT_BASE_URL);
    assert_eq!(config.timeout(), None);
    assert_eq!(config.utc_offset().unwrap(), None);
}

#[test]
fn test_parse_missing_credentials() {
    let result = ClientConfig::parse("base_url = \"http://x\"");

    assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
}

#[test]
fn test_parse_empty_seckey() {
    let toml_content = r#"
[credentials]
cp = "cp"
seckey = ""
"#;

    let result = ClientConfig::parse(toml_content);
    match result {
        Err(ConfigError::InvalidValue(message)) => assert!(message.contains("seckey")),
        other => panic!("expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_parse_invalid_utc_offset() {
    let toml_content = r#"
utc_offset_secs = 90000

[credentials]
cp = "cp"
seckey = "secret"
"#;

    let result = ClientConfig::parse(toml_content);
    assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
}

#[test]
fn test_parse_invalid_toml() {
    let result = ClientConfig::parse("base_url = ");

    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_load_missing_file() {
    let result = ClientConfig::load("/nonexistent/pcdn.toml");

    assert!(matches!(result, Err(ConfigError::ReadError(_))));
}

#[test]
fn test_resolved_base_url() {
    let mut config = ClientConfig::default();
    assert_eq!(config.resolved_base_url(), "http://api.instafogging.com");

    config.base_url = "http://x/".to_string();
    assert_eq!(config.resolved_base_url(), "http://x");

    config.base_url = "http://x".to_string();
    assert_eq!(config.resolved_base_url(), "http://x");
}

#[test]
fn test_client_config_new() {
    let config = ClientConfig::new("http://x", Credentials::new("cp", "key"));

    assert_eq!(config.base_url, "http://x");
    assert_eq!(config.credentials.cp, "cp");
    assert_eq!(config.timeout_secs, None);
    assert_eq!(config.utc_offset_secs, None);
}
