//! Model-backed guardrail classifier.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::policy::{self, InputAssessment, OutputAssessment};
use super::{Classification, Classifier, Direction};
use crate::error::TripError;
use crate::generation::generate_object;
use crate::provider::ModelProvider;
use crate::types::{GenerationSettings, ModelMessage};

/// Asks a small hosted model whether a message violates the direction's policy.
pub struct ModelClassifier {
    provider: Arc<dyn ModelProvider>,
    settings: GenerationSettings,
}

impl ModelClassifier {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            settings: GenerationSettings::builder().temperature(0.0).build(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }
}

#[async_trait]
impl Classifier for ModelClassifier {
    async fn classify(
        &self,
        message: &str,
        direction: Direction,
    ) -> Result<Classification, TripError> {
        let messages = vec![
            ModelMessage::system(policy::instructions(direction)),
            ModelMessage::user(message),
        ];
        let (schema, name) = policy::schema(direction);
        let provider = self.provider.as_ref();
        let settings = self.settings.clone();

        let (classification, usage) = match direction {
            Direction::Input => {
                let result =
                    generate_object::<InputAssessment>(provider, messages, settings, schema, name)
                        .await?;
                let classification = Classification {
                    violates: result.object.is_request_irrelevant_illegal,
                    reasoning: result.object.reasoning,
                };
                (classification, result.usage)
            }
            Direction::Output => {
                let result =
                    generate_object::<OutputAssessment>(provider, messages, settings, schema, name)
                        .await?;
                let classification = Classification {
                    violates: result.object.is_response_violates,
                    reasoning: result.object.reasoning,
                };
                (classification, result.usage)
            }
        };
        debug!(
            %direction,
            violates = classification.violates,
            tokens = usage.total_tokens,
            "classifier verdict"
        );
        Ok(classification)
    }
}
