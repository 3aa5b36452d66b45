//! Nullable infrastructure for deterministic testing.
//!
//! All external collaborators of the governance engine (clock, ledger, event
//! delivery, storage) are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod events;
pub mod ledger;
pub mod store;

pub use clock::NullClock;
pub use events::NullEventSink;
pub use ledger::NullLedger;
pub use store::NullGovernanceStore;
