//! How the provider API key is supplied.

use serde::{Deserialize, Serialize};

use crate::error::TripError;

/// An authentication value from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AuthValue {
    /// Plain API key.
    ApiKey(String),
    /// Environment variable name to read at runtime.
    EnvVar(String),
}

impl AuthValue {
    /// Resolve to the actual secret string.
    pub fn resolve(&self) -> Result<String, TripError> {
        match self {
            Self::ApiKey(k) => Ok(k.clone()),
            Self::EnvVar(var) => std::env::var(var).map_err(|_| {
                TripError::Authentication(format!("Environment variable {var} not set"))
            }),
        }
    }
}
