//! Token-weighted governance for an organization with a treasury and a
//! mutable charter.
//!
//! Members create proposals under a named policy, vote on them with weight
//! equal to their governance-token balance, and after the voting window any
//! caller may execute the proposal. If the "for" tally reaches the policy's
//! threshold (parts-per-ten-thousand of total token supply) the proposal's
//! action is applied: a treasury payout, a policy registry change, or a
//! charter edit.
//!
//! Everything runs against a [`GovernanceEngine`], which owns the store and
//! the ledger, clock and event sink handles for one organization.

mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod execution;
pub mod factory;
pub mod logging;
pub mod organization;
pub mod policy;
pub mod proposal;
pub mod treasury;
pub mod voting;

pub use config::{ConfigError, GovernanceConfig};
pub use engine::{EngineOptions, ExecutionGuard, GovernanceEngine, VotePolicy};
pub use error::{ErrorKind, GovernanceError, Result};
pub use events::TracingEventSink;
pub use execution::required_votes;
pub use factory::ProposalDraft;
pub use logging::{init_logging, LogFormat};
pub use organization::{Charter, CharterUpdate, Organization};
pub use policy::{PolicyParams, ProposalTypeRegistry};
pub use proposal::{PolicyChange, Proposal, ProposalAction, Tally, VoteRecord};
pub use treasury::Treasury;
