//! Input and output guardrails.
//!
//! A [`GuardrailGate`] turns a classifier's answer into a [`Verdict`]. The
//! gate fails closed: if the classifier cannot be reached, times out or
//! returns something unparseable, the message is denied.

pub mod classifier;
pub mod policy;
pub mod rules;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, warn};

use crate::error::TripError;
use crate::util::timeout::with_timeout;

pub use classifier::ModelClassifier;

/// Reason attached to every fail-closed denial.
pub const UNAVAILABLE_REASON: &str = "guardrail unavailable";

/// Which side of the main agent a message is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Input,
    Output,
}

/// What produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VerdictSource {
    Classifier,
    Rule,
    /// The classifier could not answer; the gate denied by default.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub allowed: bool,
    pub reason: Option<String>,
    pub source: VerdictSource,
}

impl Verdict {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            source: VerdictSource::Classifier,
        }
    }

    pub fn deny(reason: impl Into<String>, source: VerdictSource) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            source,
        }
    }

    pub fn unavailable() -> Self {
        Self::deny(UNAVAILABLE_REASON, VerdictSource::Unavailable)
    }

    pub fn is_unavailable(&self) -> bool {
        self.source == VerdictSource::Unavailable
    }
}

/// Raw classifier answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub violates: bool,
    pub reasoning: String,
}

/// Decides whether a message violates the policy for a direction.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, message: &str, direction: Direction)
        -> Result<Classification, TripError>;
}

/// Runs the rule checks and classifier for one direction.
#[derive(Clone)]
pub struct GuardrailGate {
    classifier: Arc<dyn Classifier>,
    timeout: Duration,
}

impl GuardrailGate {
    pub fn new(classifier: Arc<dyn Classifier>, timeout: Duration) -> Self {
        Self {
            classifier,
            timeout,
        }
    }

    pub async fn check(&self, message: &str, direction: Direction) -> Verdict {
        if direction == Direction::Output {
            if let Some(reason) = rules::unpriced_confirmation(message) {
                debug!(%direction, reason, "output denied by rule");
                return Verdict::deny(reason, VerdictSource::Rule);
            }
        }

        match with_timeout(self.timeout, self.classifier.classify(message, direction)).await {
            Ok(c) if c.violates => {
                let reason = match c.reasoning.trim() {
                    "" => policy::default_reason(direction).to_string(),
                    reasoning => reasoning.to_string(),
                };
                debug!(%direction, %reason, "classifier denied message");
                Verdict::deny(reason, VerdictSource::Classifier)
            }
            Ok(_) => Verdict::allow(),
            Err(e) => {
                warn!(
                    %direction,
                    error = %e,
                    outage = e.is_provider_unavailable(),
                    suggestion = ?e.recovery_suggestion(),
                    "guardrail classifier failed; denying"
                );
                Verdict::unavailable()
            }
        }
    }
}
