use impact_core::config::{dirs_path, GlobalConfig, Settings, SettingsOverrides};
use impact_core::DEFAULT_SERVICE_URL;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_with_key(key: &str) -> GlobalConfig {
    let mut config = GlobalConfig::default();
    config.submit.api_key = Some(key.to_string());
    config
}

#[test]
fn test_dirs_path_ends_with_service_dir() {
    assert!(dirs_path().ends_with(".updateimpact"));
}

#[test]
fn test_load_from_missing_file_returns_defaults() {
    let config = GlobalConfig::load_from(std::path::Path::new("/nonexistent/impact.toml")).unwrap();
    assert!(config.submit.api_key.is_none());
    assert!(config.submit.url.is_none());
}

#[test]
fn test_global_config_parse_from_toml() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(
        tmp,
        r#"
[submit]
api-key = "k-123"
url = "https://impact.example.com/"
open-browser = false
"#
    )
    .unwrap();
    tmp.flush().unwrap();

    let config = GlobalConfig::load_from(tmp.path()).unwrap();
    assert_eq!(config.submit.api_key.as_deref(), Some("k-123"));
    assert_eq!(config.submit.url.as_deref(), Some("https://impact.example.com/"));
    assert_eq!(config.submit.open_browser, Some(false));
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "[submit\napi-key = ").unwrap();
    tmp.flush().unwrap();

    let err = GlobalConfig::load_from(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration error"), "got: {err}");
}

#[test]
fn test_missing_api_key_is_fatal() {
    let err = Settings::resolve(SettingsOverrides::default(), &GlobalConfig::default())
        .unwrap_err();
    assert!(err.to_string().contains("no API key"), "got: {err}");
}

#[test]
fn test_blank_api_key_is_fatal() {
    let overrides = SettingsOverrides {
        api_key: Some("   ".to_string()),
        ..Default::default()
    };
    assert!(Settings::resolve(overrides, &GlobalConfig::default()).is_err());
}

#[test]
fn test_defaults_applied_when_only_key_given() {
    let settings =
        Settings::resolve(SettingsOverrides::default(), &config_with_key("abc")).unwrap();
    assert_eq!(settings.api_key, "abc");
    assert_eq!(settings.url, DEFAULT_SERVICE_URL);
    assert!(settings.open_browser);
}

#[test]
fn test_overrides_win_over_config_file() {
    let mut config = config_with_key("from-file");
    config.submit.url = Some("https://file.example.com".to_string());
    config.submit.open_browser = Some(true);

    let overrides = SettingsOverrides {
        api_key: Some("from-flag".to_string()),
        url: Some("https://flag.example.com/".to_string()),
        open_browser: Some(false),
    };
    let settings = Settings::resolve(overrides, &config).unwrap();
    assert_eq!(settings.api_key, "from-flag");
    assert_eq!(settings.url, "https://flag.example.com");
    assert!(!settings.open_browser);
}
