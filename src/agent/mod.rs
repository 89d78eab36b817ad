//! The main travel agent and the chat transcript it reads.

pub mod agent;
pub mod conversation;

pub use agent::{AgentReply, PendingTools, TravelAgent, TRAVEL_INSTRUCTIONS};
pub use conversation::{Speaker, Transcript};
