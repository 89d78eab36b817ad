//! Error classification used to route a failed call to a turn outcome.

/// Broad error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Configuration,
    Serialization,
    ToolExecution,
    Unknown,
}

impl ErrorCategory {
    /// Categories that mean the model provider could not be reached or
    /// refused to serve the call.
    pub fn is_provider_outage(self) -> bool {
        matches!(
            self,
            Self::Authentication
                | Self::RateLimit
                | Self::Network
                | Self::Timeout
                | Self::Server
                | Self::Api
        )
    }
}

/// Suggested action for an operator reading the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    RetryLater,
    CheckCredentials,
    CheckConfiguration,
    IncreaseTimeout,
    CheckToolImplementation,
    ContactSupport,
}
