// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Fixline configuration system.

use fixline_config::diagnostic::suggest_key;
use fixline_config::model::FixlineConfig;
use fixline_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_fixline_config() {
    let toml = r#"
[service]
name = "fixline-test"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080
bearer_token = "secret"
cors_origin = "https://app.example.com"

[storage]
database_path = "/tmp/test.db"
wal_mode = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.service.name, "fixline-test");
    assert_eq!(config.service.log_level, "debug");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.bearer_token.as_deref(), Some("secret"));
    assert_eq!(
        config.server.cors_origin.as_deref(),
        Some("https://app.example.com")
    );
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
}

/// Unknown field in [server] section is rejected by deny_unknown_fields.
#[test]
fn unknown_field_in_server_produces_error() {
    let toml = r#"
[server]
prot = 8080
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("prot"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.service.name, "fixline");
    assert_eq!(config.service.log_level, "info");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5000);
    assert!(config.server.bearer_token.is_none());
    assert!(config.server.cors_origin.is_none());
    assert!(config.storage.wal_mode);
}

/// Env-style dotted overrides merge over TOML values.
#[test]
fn dotted_override_wins_over_toml() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let toml_content = r#"
[service]
name = "from-toml"
"#;

    let config: FixlineConfig = Figment::new()
        .merge(Serialized::defaults(FixlineConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("service.name", "from-env"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.service.name, "from-env");
}

/// `server.bearer_token` stays one key even though it contains an
/// underscore; it must never split into `server.bearer.token`.
#[test]
fn bearer_token_maps_as_single_key() {
    use figment::{providers::Serialized, Figment};

    let config: FixlineConfig = Figment::new()
        .merge(Serialized::defaults(FixlineConfig::default()))
        .merge(("server.bearer_token", "xyz-from-env"))
        .extract()
        .expect("should set bearer_token via dot notation");

    assert_eq!(config.server.bearer_token.as_deref(), Some("xyz-from-env"));
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn explicit_path_overrides_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fixline.toml");
    std::fs::write(&path, "[server]\nport = 9999\n").expect("write config");

    let config = fixline_config::load_and_validate_path(&path).expect("explicit path loads");
    assert_eq!(config.server.port, 9999);
    assert_eq!(config.service.name, "fixline");
}

#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: FixlineConfig = Figment::new()
        .merge(Serialized::defaults(FixlineConfig::default()))
        .merge(Toml::file("/nonexistent/path/fixline.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.service.name, "fixline");
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[logging]
level = "debug"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("logging"),
        "error should mention unknown field, got: {err_str}"
    );
}

// ============================================================================
// Validation tests
// ============================================================================

/// Load-and-validate rejects a log level outside the known set.
#[test]
fn validation_rejects_bogus_log_level() {
    let errors = load_and_validate_str(
        r#"
[service]
log_level = "loud"
"#,
    )
    .expect_err("bogus log level should fail validation");
    assert!(!errors.is_empty());
}

/// Load-and-validate rejects an empty bearer token (unset is fine, empty
/// is a misconfiguration).
#[test]
fn validation_rejects_empty_bearer_token() {
    let errors = load_and_validate_str(
        r#"
[server]
bearer_token = ""
"#,
    )
    .expect_err("empty bearer token should fail validation");
    assert!(!errors.is_empty());
}

/// A fully-defaulted config passes validation.
#[test]
fn validation_accepts_defaults() {
    load_and_validate_str("").expect("default config should validate");
}

// ============================================================================
// Diagnostic tests
// ============================================================================

/// Unknown key "prot" suggests "port".
#[test]
fn diagnostic_prot_suggests_port() {
    let valid_keys = &["host", "port", "bearer_token", "cors_origin"];
    let suggestion = suggest_key("prot", valid_keys);
    assert_eq!(suggestion, Some("port".to_string()));
}

/// Unknown key "bearer_tken" suggests "bearer_token".
#[test]
fn diagnostic_bearer_tken_suggests_bearer_token() {
    let valid_keys = &["host", "port", "bearer_token", "cors_origin"];
    let suggestion = suggest_key("bearer_tken", valid_keys);
    assert_eq!(suggestion, Some("bearer_token".to_string()));
}

/// Unknown key "zzzzzz" with no close match does NOT produce a suggestion.
#[test]
fn diagnostic_no_suggestion_for_distant_typo() {
    let valid_keys = &["host", "port", "bearer_token", "cors_origin"];
    let suggestion = suggest_key("zzzzzz", valid_keys);
    assert!(suggestion.is_none(), "should not suggest for distant typo");
}
