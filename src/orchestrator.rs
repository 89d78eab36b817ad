//! Per-turn state machine: input gate, main agent (and tools), output gate.
//!
//! Every turn runs to `Done` in one pass. Failures never escape as errors;
//! they are reported through [`TurnOutcome`].

use std::sync::Arc;

use serde::Serialize;
use strum::Display;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::agent::{AgentReply, Transcript, TravelAgent};
use crate::config::TripConfig;
use crate::error::TripError;
use crate::guardrail::{Direction, GuardrailGate, ModelClassifier, Verdict};
use crate::profile::ProfileContext;
use crate::provider::{create_providers, ProviderPair};
use crate::tools::{travel_tools, StaticCatalog, ToolExecutionContext, ToolSet, TravelDataSource};

/// Shown to the user when a provider call fails.
pub const UNAVAILABLE_NOTICE: &str =
    "Sorry, the travel assistant is unavailable right now. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum TurnState {
    Ready,
    AwaitingMain,
    AwaitingTool,
    AwaitingOutputCheck,
    Done,
}

/// Where a turn stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    InputGuardrail,
    MainAgent,
    OutputGuardrail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TurnOutcome {
    Reply(String),
    PolicyViolation { stage: Stage, reason: String },
    ProviderUnavailable { stage: Stage },
}

impl TurnOutcome {
    pub fn is_reply(&self) -> bool {
        matches!(self, Self::Reply(_))
    }

    /// Text the user sees for this outcome.
    pub fn notice(&self) -> String {
        match self {
            Self::Reply(text) => text.clone(),
            Self::PolicyViolation {
                stage: Stage::InputGuardrail,
                reason,
            } => format!("Request Blocked: {reason}"),
            Self::PolicyViolation { reason, .. } => format!("Response Blocked: {reason}"),
            Self::ProviderUnavailable { .. } => UNAVAILABLE_NOTICE.to_string(),
        }
    }
}

/// Record of one orchestrator invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub input: String,
    /// Final text, present only when the output gate allowed it.
    pub output: Option<String>,
    pub rejected: bool,
    pub outcome: TurnOutcome,
    /// States visited, in order. Always ends in `Done`.
    pub path: Vec<TurnState>,
    pub tool_calls: usize,
}

impl ConversationTurn {
    pub fn final_state(&self) -> TurnState {
        self.path.last().copied().unwrap_or(TurnState::Ready)
    }
}

impl Transcript {
    /// Append a finished turn the way the chat shows it.
    pub fn record(&mut self, turn: &ConversationTurn) {
        self.push_user(turn.input.clone());
        self.push_agent(turn.outcome.notice());
    }
}

/// Tracks the state path of a single turn.
struct TurnRun {
    id: Uuid,
    input: String,
    path: Vec<TurnState>,
    tool_calls: usize,
}

impl TurnRun {
    fn new(input: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            input: input.to_string(),
            path: vec![TurnState::Ready],
            tool_calls: 0,
        }
    }

    fn advance(&mut self, next: TurnState) {
        debug!(turn = %self.id, from = ?self.path.last(), to = %next, "turn state");
        self.path.push(next);
    }

    fn finish(mut self, outcome: TurnOutcome) -> ConversationTurn {
        self.advance(TurnState::Done);
        let output = match &outcome {
            TurnOutcome::Reply(text) => Some(text.clone()),
            _ => None,
        };
        match &outcome {
            TurnOutcome::Reply(_) => {
                info!(turn = %self.id, tools = self.tool_calls, "turn answered")
            }
            TurnOutcome::PolicyViolation { stage, reason } => {
                info!(turn = %self.id, %stage, %reason, "turn blocked by guardrail")
            }
            TurnOutcome::ProviderUnavailable { stage } => {
                warn!(turn = %self.id, %stage, "turn failed: provider unavailable")
            }
        }
        ConversationTurn {
            id: self.id,
            input: self.input,
            rejected: output.is_none(),
            output,
            outcome,
            path: self.path,
            tool_calls: self.tool_calls,
        }
    }
}

fn denied(verdict: Verdict, stage: Stage) -> TurnOutcome {
    if verdict.is_unavailable() {
        return TurnOutcome::ProviderUnavailable { stage };
    }
    TurnOutcome::PolicyViolation {
        stage,
        reason: verdict.reason.unwrap_or_default(),
    }
}

/// Runs guarded turns. Holds only immutable state, so one instance can serve
/// concurrent sessions.
pub struct Orchestrator {
    gate: GuardrailGate,
    agent: TravelAgent,
    tools: ToolSet,
    tool_ctx: ToolExecutionContext,
}

impl Orchestrator {
    pub fn new(
        gate: GuardrailGate,
        agent: TravelAgent,
        tools: ToolSet,
        profile: Arc<ProfileContext>,
    ) -> Self {
        Self {
            gate,
            agent,
            tools,
            tool_ctx: ToolExecutionContext::new(profile),
        }
    }

    /// Wire the default components around an existing provider pair.
    pub fn with_providers(
        providers: ProviderPair,
        config: &TripConfig,
        source: Arc<dyn TravelDataSource>,
    ) -> Self {
        let profile = Arc::new(config.profile.clone());
        let tools = travel_tools(source);
        let gate = GuardrailGate::new(
            Arc::new(ModelClassifier::new(providers.guardrail)),
            config.request_timeout,
        );
        let agent =
            TravelAgent::new(providers.main, &profile, &tools).with_timeout(config.request_timeout);
        Self::new(gate, agent, tools, profile)
    }

    /// Build the full assistant from configuration.
    pub fn from_config(config: &TripConfig) -> Result<Self, TripError> {
        config.validate()?;
        let providers = create_providers(config)?;
        Ok(Self::with_providers(
            providers,
            config,
            Arc::new(StaticCatalog::sample()),
        ))
    }

    pub fn profile(&self) -> &ProfileContext {
        &self.tool_ctx.profile
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Run a single message with no prior history.
    pub async fn ask(&self, input: &str) -> ConversationTurn {
        self.run_turn(input, &Transcript::new()).await
    }

    /// Run one turn. The input gate sees only `input`; the main agent sees
    /// `history` followed by `input`.
    pub async fn run_turn(&self, input: &str, history: &Transcript) -> ConversationTurn {
        let mut run = TurnRun::new(input);

        let verdict = self.gate.check(input, Direction::Input).await;
        if !verdict.allowed {
            return run.finish(denied(verdict, Stage::InputGuardrail));
        }

        run.advance(TurnState::AwaitingMain);
        let reply = match self.agent.respond(&history.flatten_with(input)).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    error = %e,
                    outage = e.is_provider_unavailable(),
                    suggestion = ?e.recovery_suggestion(),
                    "main agent call failed"
                );
                return run.finish(TurnOutcome::ProviderUnavailable {
                    stage: Stage::MainAgent,
                });
            }
        };

        let text = match reply {
            AgentReply::Text(text) => text,
            AgentReply::ToolCalls(pending) => {
                run.advance(TurnState::AwaitingTool);
                let mut results = Vec::with_capacity(pending.calls().len());
                for call in pending.calls() {
                    results.push(self.tools.execute(call, &self.tool_ctx).await);
                }
                run.tool_calls = results.len();
                match self.agent.resume(pending, results).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(
                            error = %e,
                            outage = e.is_provider_unavailable(),
                    suggestion = ?e.recovery_suggestion(),
                            "main agent failed after tool results"
                        );
                        return run.finish(TurnOutcome::ProviderUnavailable {
                            stage: Stage::MainAgent,
                        });
                    }
                }
            }
        };

        run.advance(TurnState::AwaitingOutputCheck);
        let verdict = self.gate.check(&text, Direction::Output).await;
        if !verdict.allowed {
            return run.finish(denied(verdict, Stage::OutputGuardrail));
        }
        run.finish(TurnOutcome::Reply(text))
    }
}
