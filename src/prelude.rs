//! Convenience re-exports for common use.

pub use crate::agent::{AgentReply, Transcript, TravelAgent};
pub use crate::config::TripConfig;
pub use crate::error::{Result, TripError};
pub use crate::guardrail::{Classifier, Direction, GuardrailGate, Verdict, VerdictSource};
pub use crate::orchestrator::{ConversationTurn, Orchestrator, Stage, TurnOutcome, TurnState};
pub use crate::profile::ProfileContext;
pub use crate::provider::{ModelProvider, ProviderPair};
pub use crate::tools::{StaticCatalog, Tool, ToolArguments, ToolSet, TravelDataSource};
pub use crate::types::{GenerationSettings, ModelMessage, Role, Usage};
