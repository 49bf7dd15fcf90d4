//! Tests for client configuration loading.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tictac_meow::{ClientConfig, Difficulty, SERVER_URL_ENV};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = ClientConfig::default();

    assert_eq!(config.server_url(), "http://127.0.0.1:3000");
    assert_eq!(*config.difficulty(), Difficulty::Medium);
    assert_eq!(config.ai_delay(), Duration::from_millis(700));
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.log_file(), &PathBuf::from("tictac_meow.log"));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let file = write_config(
        r#"
server_url = "http://games.local:8080"
difficulty = "hard"
"#,
    );

    let config = ClientConfig::from_file(file.path()).unwrap();

    assert_eq!(config.server_url(), "http://games.local:8080");
    assert_eq!(*config.difficulty(), Difficulty::Hard);
    assert_eq!(*config.ai_delay_ms(), 700);

    let settings = config.orchestrator_settings();
    assert_eq!(settings.difficulty, Difficulty::Hard);
    assert_eq!(settings.ai_delay, Duration::from_millis(700));
}

#[test]
fn test_unknown_difficulty_is_rejected() {
    let file = write_config(r#"difficulty = "impossible""#);

    let err = ClientConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_non_http_url_is_rejected() {
    let file = write_config(r#"server_url = "ftp://games.local""#);

    let err = ClientConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("server_url"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let file = write_config("request_timeout_secs = 0");

    assert!(ClientConfig::from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ClientConfig::from_file(dir.path().join("absent.toml")).unwrap_err();

    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_environment_overrides_server_url() {
    let config = ClientConfig::default().with_overrides_from(|key| {
        (key == SERVER_URL_ENV).then(|| "http://10.0.0.5:3000".to_string())
    });

    assert_eq!(config.server_url(), "http://10.0.0.5:3000");
}

#[test]
fn test_blank_override_is_ignored() {
    let config = ClientConfig::default().with_overrides_from(|_| Some("  ".to_string()));

    assert_eq!(config.server_url(), "http://127.0.0.1:3000");
}

#[test]
fn test_setters_layer_cli_values() {
    let config = ClientConfig::default()
        .with_server_url("http://example.test")
        .with_difficulty(Difficulty::Easy)
        .with_ai_delay_ms(0u64);

    assert_eq!(config.server_url(), "http://example.test");
    assert_eq!(*config.difficulty(), Difficulty::Easy);
    assert!(config.ai_delay().is_zero());
}

#[test]
fn test_environment_url_without_scheme_is_rejected() {
    let err = ClientConfig::load_with(None, |key| {
        (key == SERVER_URL_ENV).then(|| "games.local:3000".to_string())
    })
    .unwrap_err();

    assert!(err.message.contains("server_url"));
}

#[test]
fn test_load_with_applies_valid_environment_url() {
    let file = write_config("difficulty = \"easy\"");

    let config = ClientConfig::load_with(Some(file.path()), |key| {
        (key == SERVER_URL_ENV).then(|| "https://games.local".to_string())
    })
    .unwrap();

    assert_eq!(config.server_url(), "https://games.local");
    assert_eq!(*config.difficulty(), Difficulty::Easy);
}

#[test]
fn test_cli_values_are_checked_after_layering() {
    let config = ClientConfig::default().with_server_url("localhost:3000");
    assert!(config.validate().is_err());

    let config = ClientConfig::default().with_request_timeout_secs(0u64);
    assert!(config.validate().is_err());

    assert!(ClientConfig::default().validate().is_ok());
}
