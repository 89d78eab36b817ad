//! Configuration (layered: defaults < config file < env < explicit overrides).
//!
//! A [`TripConfig`] is an ordinary value. The binary builds one at startup
//! and hands it to each component it constructs; nothing reads configuration
//! from a process-wide singleton.

pub mod auth;

pub use auth::AuthValue;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::TripError;
use crate::profile::ProfileContext;

/// Google's OpenAI-compatible endpoint for Gemini models.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
/// Model serving the main travel agent.
pub const DEFAULT_MAIN_MODEL: &str = "gemini-2.5-flash";
/// Smaller model serving both guardrail classifiers.
pub const DEFAULT_GUARDRAIL_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Longest per-call timeout accepted from any layer.
const MAX_TIMEOUT_SECS: u64 = 600;

/// Environment variables consulted by [`TripConfig::apply_env`], in precedence order
/// for the API key.
const API_KEY_VARS: [&str; 2] = ["TRIPGUARD_API_KEY", "GEMINI_API_KEY"];

/// Runtime configuration for the assistant.
#[derive(Clone)]
pub struct TripConfig {
    api_key: Option<String>,
    pub base_url: String,
    pub main_model: String,
    pub guardrail_model: String,
    pub request_timeout: Duration,
    pub profile: ProfileContext,
}

impl fmt::Debug for TripConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("main_model", &self.main_model)
            .field("guardrail_model", &self.guardrail_model)
            .field("request_timeout", &self.request_timeout)
            .field("profile", &self.profile)
            .finish()
    }
}

impl Default for TripConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk shape of `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    provider: ProviderSection,
    profile: Option<ProfileContext>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderSection {
    api_key: Option<AuthValue>,
    base_url: Option<String>,
    main_model: Option<String>,
    guardrail_model: Option<String>,
    timeout_secs: Option<u64>,
}

impl TripConfig {
    /// Built-in defaults, no API key.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            main_model: DEFAULT_MAIN_MODEL.to_string(),
            guardrail_model: DEFAULT_GUARDRAIL_MODEL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            profile: ProfileContext::default(),
        }
    }

    /// Defaults overlaid with environment variables (and `.env`, if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::new().apply_env()
    }

    /// Full layered load used by the binary.
    ///
    /// An explicit `path` must exist. Without one, the per-user config file is
    /// read only when present.
    pub fn load(path: Option<&Path>) -> Result<Self, TripError> {
        let _ = dotenvy::dotenv();
        let mut config = Self::new();
        match path {
            Some(path) => config = config.merge_file(path)?,
            None => {
                if let Some(default) = Self::default_path().filter(|p| p.exists()) {
                    tracing::debug!(path = %default.display(), "loading default config file");
                    config = config.merge_file(&default)?;
                }
            }
        }
        Ok(config.apply_env())
    }

    /// `<config_dir>/tripguard/config.toml` for the current user.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "tripguard")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from a TOML file.
    pub fn merge_file(self, path: &Path) -> Result<Self, TripError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TripError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        self.merge_toml(&raw)
    }

    /// Overlay values from TOML text.
    pub fn merge_toml(mut self, raw: &str) -> Result<Self, TripError> {
        let file: FileConfig = toml::from_str(raw)
            .map_err(|e| TripError::Configuration(format!("invalid config file: {e}")))?;

        let provider = file.provider;
        if let Some(auth) = provider.api_key {
            self.api_key = Some(auth.resolve()?);
        }
        if let Some(url) = provider.base_url {
            self.base_url = url;
        }
        if let Some(model) = provider.main_model {
            self.main_model = model;
        }
        if let Some(model) = provider.guardrail_model {
            self.guardrail_model = model;
        }
        if let Some(secs) = provider.timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(profile) = file.profile {
            self.profile = profile;
        }
        Ok(self)
    }

    /// Overlay values from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup.
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = API_KEY_VARS.iter().find_map(|var| lookup(var)) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup("TRIPGUARD_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = lookup("TRIPGUARD_MAIN_MODEL") {
            self.main_model = model;
        }
        if let Some(model) = lookup("TRIPGUARD_GUARDRAIL_MODEL") {
            self.guardrail_model = model;
        }
        match lookup("TRIPGUARD_TIMEOUT_SECS").map(|raw| raw.parse::<u64>()) {
            Some(Ok(secs)) => self.request_timeout = Duration::from_secs(secs),
            Some(Err(e)) => tracing::warn!(error = %e, "ignoring invalid TRIPGUARD_TIMEOUT_SECS"),
            None => {}
        }
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Check the config is usable before any provider is built.
    pub fn validate(&self) -> Result<(), TripError> {
        if !self.has_credentials() {
            return Err(TripError::Authentication(
                "Missing GEMINI_API_KEY (or TRIPGUARD_API_KEY)".into(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(TripError::Configuration("base_url is empty".into()));
        }
        if self.main_model.trim().is_empty() || self.guardrail_model.trim().is_empty() {
            return Err(TripError::Configuration("model identifiers must not be empty".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(TripError::Configuration("request timeout must be positive".into()));
        }
        if self.request_timeout > Duration::from_secs(MAX_TIMEOUT_SECS) {
            return Err(TripError::Configuration(format!(
                "request timeout must be at most {MAX_TIMEOUT_SECS} seconds"
            )));
        }
        Ok(())
    }
}
