//! Tests for layered configuration loading.

use std::io::Write;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use tripguard::config::{AuthValue, TripConfig, DEFAULT_MAIN_MODEL};
use tripguard::error::TripError;
use tripguard::orchestrator::Orchestrator;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 7] = [
    "GEMINI_API_KEY",
    "TRIPGUARD_API_KEY",
    "TRIPGUARD_BASE_URL",
    "TRIPGUARD_MAIN_MODEL",
    "TRIPGUARD_GUARDRAIL_MODEL",
    "TRIPGUARD_TIMEOUT_SECS",
    "TRIPGUARD_TEST_SECRET",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clean_env() -> EnvGuard {
    let guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
    guard
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn from_env_reads_gemini_key() {
    let _lock = env_lock_guard();
    let _env = clean_env();
    std::env::set_var("GEMINI_API_KEY", "gem-key");

    let config = TripConfig::from_env();
    assert_eq!(config.api_key(), Some("gem-key"));
    assert!(config.has_credentials());
    assert_eq!(config.main_model, DEFAULT_MAIN_MODEL);
}

#[test]
fn env_overrides_the_config_file() {
    let _lock = env_lock_guard();
    let _env = clean_env();
    let file = config_file(
        r#"
        [provider]
        api_key = { type = "api_key", value = "file-key" }
        main_model = "from-file"
        guardrail_model = "guard-from-file"
        timeout_secs = 9
        "#,
    );
    std::env::set_var("TRIPGUARD_MAIN_MODEL", "from-env");

    let config = TripConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.api_key(), Some("file-key"));
    assert_eq!(config.main_model, "from-env");
    assert_eq!(config.guardrail_model, "guard-from-file");
    assert_eq!(config.request_timeout, Duration::from_secs(9));
}

#[test]
fn file_key_can_point_at_an_env_var() {
    let _lock = env_lock_guard();
    let _env = clean_env();
    std::env::set_var("TRIPGUARD_TEST_SECRET", "indirect-key");
    let file = config_file(
        r#"
        [provider]
        api_key = { type = "env_var", value = "TRIPGUARD_TEST_SECRET" }
        "#,
    );

    let config = TripConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.api_key(), Some("indirect-key"));
}

#[test]
fn missing_env_var_reference_is_an_auth_error() {
    let _lock = env_lock_guard();
    let _env = clean_env();
    let err = AuthValue::EnvVar("TRIPGUARD_TEST_SECRET".into())
        .resolve()
        .unwrap_err();
    assert!(matches!(err, TripError::Authentication(_)));
}

#[test]
fn explicit_config_path_must_exist() {
    let _lock = env_lock_guard();
    let _env = clean_env();
    let dir = tempfile::tempdir().unwrap();
    let err = TripConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, TripError::Configuration(_)));
}

#[test]
fn huge_env_timeout_is_a_configuration_error() {
    let _lock = env_lock_guard();
    let _env = clean_env();
    std::env::set_var("GEMINI_API_KEY", "gem-key");
    std::env::set_var("TRIPGUARD_TIMEOUT_SECS", "18446744073709551615");

    let config = TripConfig::from_env();
    assert_eq!(config.request_timeout, Duration::from_secs(u64::MAX));
    let err = Orchestrator::from_config(&config).err().unwrap();
    assert!(matches!(err, TripError::Configuration(_)));
}

#[test]
fn profile_accepts_departure_city_alias() {
    let config = TripConfig::new()
        .merge_toml(
            r#"
            [profile]
            name = "Kenji"
            age = 29
            departure_city = "Osaka"
            budget = 250.0
            "#,
        )
        .unwrap();
    assert_eq!(config.profile.preferred_city, "Osaka");
    assert!(config.profile.travel_history.is_empty());
}
