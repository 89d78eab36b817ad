//! tripguard: a travel booking assistant behind input and output guardrails.
//!
//! Each user message passes an input classifier before the main agent sees
//! it, and the agent's answer passes an output classifier (plus a local
//! booking-cost rule) before the user sees it. Guardrails fail closed.
//!
//! # Quick Start
//!
//! ```no_run
//! use tripguard::prelude::*;
//!
//! # async fn example() -> tripguard::error::Result<()> {
//! let config = TripConfig::from_env();
//! let assistant = Orchestrator::from_config(&config)?;
//! let turn = assistant.ask("Find me a flight from Tokyo to Paris on 2025-06-01").await;
//! println!("{}", turn.outcome.notice());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod generation;
pub mod guardrail;
pub mod models;
pub mod orchestrator;
pub mod prelude;
pub mod profile;
pub mod provider;
pub mod tools;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
