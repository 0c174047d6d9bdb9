//! Tests for configuration layer precedence.

use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::build_config_from_layers;

#[rstest]
#[case::file_overrides_defaults(
    vec![
        ("defaults", json!({"api_base": "https://default.invalid"})),
        ("file", json!({"api_base": "https://file.invalid"})),
    ],
    "api_base",
    "https://file.invalid",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"token": "file-token"})), ("environment", json!({"token": "env-token"}))],
    "token",
    "env-token",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![
        ("environment", json!({"room": "!env:example.org"})),
        ("cli", json!({"room": "!cli:example.org"})),
    ],
    "room",
    "!cli:example.org",
    "CLI should override environment"
)]
#[case::database_url_defaults_file_env_cli(
    vec![
        ("defaults", json!({"database_url": "default-db"})),
        ("file", json!({"database_url": "file-db"})),
        ("environment", json!({"database_url": "env-db"})),
        ("cli", json!({"database_url": "cli-db"}))
    ],
    "database_url",
    "cli-db",
    "CLI should win for database_url"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let config = build_config_from_layers(&layers);

    let actual = match field {
        "api_base" => config.api_base.as_deref(),
        "token" => config.token.as_deref(),
        "room" => config.room.as_deref(),
        "database_url" => config.database_url.as_deref(),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn unset_fields_take_built_in_defaults() {
    let config = build_config_from_layers(&[("defaults", json!({"token": null}))]);

    assert!(config.token.is_none(), "token should be None");
    assert!(config.database_url.is_none(), "database_url should be None");
    assert_eq!(
        config.request_timeout_seconds, 10,
        "request timeout should default to 10 seconds"
    );
    assert!(!config.rich_replies, "plain replies are the default");
    assert!(
        !config.remind_missing_default,
        "missing defaults are dropped silently by default"
    );
}

#[rstest]
fn partial_overrides_preserve_lower_values() {
    let config = build_config_from_layers(&[
        ("file", json!({"room": "!file:example.org", "user": "@file:example.org"})),
        ("cli", json!({"room": "!cli:example.org"})),
    ]);

    assert_eq!(config.room.as_deref(), Some("!cli:example.org"));
    assert_eq!(
        config.user.as_deref(),
        Some("@file:example.org"),
        "file user should be preserved"
    );
}

#[rstest]
fn boolean_switches_follow_the_highest_layer() {
    let config = build_config_from_layers(&[
        ("defaults", json!({"rich_replies": false, "send_notices": false})),
        ("file", json!({"rich_replies": true, "send_notices": true})),
        ("cli", json!({"send_notices": false})),
    ]);

    assert!(config.rich_replies, "file should enable rich replies");
    assert!(!config.send_notices, "CLI should win for send_notices");
}

#[rstest]
fn request_timeout_is_read_from_file() {
    let config = build_config_from_layers(&[("file", json!({"request_timeout_seconds": 3}))]);

    assert_eq!(config.request_timeout_seconds, 3);
}
