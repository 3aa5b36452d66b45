//! Fundamental types for the Quorum governance engine.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account addresses, asset references, timestamps, proposal identifiers and
//! vote options, governance events, and the traits through which the engine
//! talks to its external collaborators (ledger, clock, event sink).

pub mod address;
pub mod asset;
pub mod clock;
pub mod event;
pub mod ledger;
pub mod proposal;
pub mod time;

pub use address::AccountAddress;
pub use asset::{Asset, AssetId, Currency, CurrencyName};
pub use clock::{Clock, SystemClock};
pub use event::{EventSink, GovernanceEvent};
pub use ledger::{Ledger, LedgerError};
pub use proposal::{ProposalId, ProposalKind, ProposalResult, VoteOption};
pub use time::Timestamp;

/// Denominator for thresholds expressed in parts-per-ten-thousand.
pub const BPS_DENOMINATOR: u64 = 10_000;
