//! Shared harness: an engine wired to the nullables, initialized with the
//! `standard` policy and a `GOV` governance token.

#![allow(dead_code)]

use quorum_governance::{
    Charter, EngineOptions, GovernanceEngine, PolicyParams, ProposalDraft,
};
use quorum_nullables::{NullClock, NullEventSink, NullGovernanceStore, NullLedger};
use quorum_types::{AccountAddress, AssetId, Currency};

pub type TestEngine = GovernanceEngine<NullGovernanceStore, NullLedger, NullClock, NullEventSink>;

pub const START: u64 = 1_000;
pub const DURATION: u64 = 100_000_000;

pub struct Sui;
impl Currency for Sui {
    const NAME: &'static [u8] = b"0x2::sui::SUI";
}

pub struct Usd;
impl Currency for Usd {
    const NAME: &'static [u8] = b"0x5::usd::USD";
}

pub fn standard_policy() -> PolicyParams {
    PolicyParams {
        duration: DURATION,
        success_vote_percent: 30,
        min_amount_to_vote: 30_000_000,
        min_amount_to_create_proposal: 100_000_000,
    }
}

pub fn gov() -> AssetId {
    AssetId::new("GOV")
}

pub fn addr(name: &str) -> AccountAddress {
    AccountAddress::new(name)
}

pub fn treasury() -> AccountAddress {
    addr("treasury")
}

pub fn charter() -> Charter {
    Charter {
        name: "Guild".to_string(),
        description: "A test guild".to_string(),
        image_url: "https://example.org/guild.png".to_string(),
        governance_token: gov(),
    }
}

pub fn uninitialized(options: EngineOptions) -> TestEngine {
    GovernanceEngine::new(
        NullGovernanceStore::new(),
        NullLedger::new(),
        NullClock::new(START),
        NullEventSink::new(),
        options,
    )
}

pub fn engine_with(options: EngineOptions) -> TestEngine {
    let mut engine = uninitialized(options);
    engine
        .initialize(&addr("creator"), charter(), treasury(), "standard", standard_policy())
        .expect("initialize");
    engine
}

pub fn engine() -> TestEngine {
    engine_with(EngineOptions::default())
}

pub fn draft(title: &str) -> ProposalDraft {
    ProposalDraft::new(title, format!("{title} description"), "standard")
}

/// Move the clock to the end of the standard voting window.
pub fn close_window(engine: &TestEngine) {
    engine.clock().advance(DURATION);
}
