//! Configuration loading tests
//!
//! These mutate the process environment and run serially.

use std::io::Write;

use serial_test::serial;
use student_portal::shared::config::{AppConfig, ConfigError, TokenCodecKind};

const KEYS: [&str; 9] = [
    "PORTAL_CONFIG",
    "DATABASE_URL",
    "JWT_SECRET",
    "TOKEN_CODEC",
    "TOKEN_TTL_HOURS",
    "PROBE_TIMEOUT_MS",
    "BCRYPT_COST",
    "SEED_DEMO_ACCOUNTS",
    "SERVER_PORT",
];

fn clear_env() {
    for key in KEYS {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_load_from_file_with_env_override() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "jwt_secret = \"from-file\"\ntoken_ttl_hours = 12\nserver_port = 8080").unwrap();

    std::env::set_var("PORTAL_CONFIG", file.path());
    std::env::set_var("SERVER_PORT", "9090");
    std::env::set_var("TOKEN_CODEC", "unsigned");

    let config = AppConfig::load().unwrap();
    clear_env();

    assert_eq!(config.jwt_secret, "from-file");
    assert_eq!(config.token_ttl_hours, 12);
    assert_eq!(config.server_port, 9090);
    assert_eq!(config.token_codec, TokenCodecKind::Unsigned);
    assert!(config.database_url.is_none());
}

#[test]
#[serial]
fn test_load_rejects_invalid_cost() {
    clear_env();
    std::env::set_var("BCRYPT_COST", "99");

    let result = AppConfig::load();
    clear_env();

    crate::assert_err!(result, ConfigError::InvalidValue { key: "BCRYPT_COST", .. });
}

#[test]
#[serial]
fn test_load_missing_file() {
    clear_env();
    std::env::set_var("PORTAL_CONFIG", "/nonexistent/portal.toml");

    let result = AppConfig::load();
    clear_env();

    crate::assert_err!(result, ConfigError::Io(_));
}
