//! Proposals and their lifecycle.
//!
//! `Pending` → (voting window elapses) → executed → `Success` | `Fail`.
//! Nothing moves a proposal back to `Pending` or clears `executed`.

use crate::error::{GovernanceError, Result};
use crate::organization::CharterUpdate;
use crate::policy::PolicyParams;
use quorum_types::{
    AccountAddress, AssetId, CurrencyName, ProposalId, ProposalKind, ProposalResult, Timestamp,
    VoteOption,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a successful `policy-update` proposal does to its named policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyChange {
    /// Insert or replace the policy with these parameters.
    Update(PolicyParams),
    /// Remove the policy.
    Remove,
}

impl PolicyChange {
    pub const UPDATE: &'static str = "update";
    pub const REMOVE: &'static str = "remove";

    /// Build a change from its textual update mode.
    ///
    /// The mode must be exactly `"update"` or `"remove"`; `"update"` also
    /// needs the new parameters.
    pub fn from_mode(mode: &str, params: Option<PolicyParams>) -> Result<Self> {
        match mode {
            Self::UPDATE => params
                .map(Self::Update)
                .ok_or(GovernanceError::MissingField("policy parameters")),
            Self::REMOVE => Ok(Self::Remove),
            other => Err(GovernanceError::InvalidUpdateMode(other.to_string())),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Update(_) => Self::UPDATE,
            Self::Remove => Self::REMOVE,
        }
    }
}

/// The action a proposal applies when it succeeds, with exactly the fields
/// its kind needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalAction {
    /// A signalling proposal with no side effect.
    Standard,
    /// Pay `amount` of a fungible asset out of the treasury.
    AssetTransfer {
        asset: AssetId,
        recipient: AccountAddress,
        amount: u64,
    },
    /// Pay `amount` of a native currency out of the treasury.
    CurrencyTransfer {
        currency: CurrencyName,
        recipient: AccountAddress,
        amount: u64,
    },
    /// Change the proposal type registry.
    PolicyUpdate { policy: String, change: PolicyChange },
    /// Overwrite some of the organization's charter fields.
    CharterUpdate(CharterUpdate),
}

impl ProposalAction {
    pub fn kind(&self) -> ProposalKind {
        match self {
            Self::Standard => ProposalKind::Standard,
            Self::AssetTransfer { .. } => ProposalKind::AssetTransfer,
            Self::CurrencyTransfer { .. } => ProposalKind::CurrencyTransfer,
            Self::PolicyUpdate { .. } => ProposalKind::PolicyUpdate,
            Self::CharterUpdate(_) => ProposalKind::CharterUpdate,
        }
    }
}

/// A voter's recorded choice and the weight it carried when cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub option: VoteOption,
    pub weight: u64,
}

/// Weighted vote totals.
///
/// `votes_for + votes_against + votes_abstain == total_votes` at all times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub votes_for: u128,
    pub votes_against: u128,
    pub votes_abstain: u128,
    pub total_votes: u128,
}

impl Tally {
    fn bucket(&mut self, option: VoteOption) -> &mut u128 {
        match option {
            VoteOption::For => &mut self.votes_for,
            VoteOption::Against => &mut self.votes_against,
            VoteOption::Abstain => &mut self.votes_abstain,
        }
    }

    /// Count `weight` towards `option`.
    pub fn add(&mut self, option: VoteOption, weight: u64) -> Result<()> {
        let weight = u128::from(weight);
        let total = self
            .total_votes
            .checked_add(weight)
            .ok_or(GovernanceError::Overflow)?;
        let bucket = self.bucket(option);
        *bucket = bucket.checked_add(weight).ok_or(GovernanceError::Overflow)?;
        self.total_votes = total;
        Ok(())
    }

    /// Take back a weight previously counted towards `option`.
    pub fn retract(&mut self, option: VoteOption, weight: u64) -> Result<()> {
        let weight = u128::from(weight);
        let total = self
            .total_votes
            .checked_sub(weight)
            .ok_or(GovernanceError::Overflow)?;
        let bucket = self.bucket(option);
        *bucket = bucket.checked_sub(weight).ok_or(GovernanceError::Overflow)?;
        self.total_votes = total;
        Ok(())
    }
}

/// A governance proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: AccountAddress,
    /// Name of the policy this proposal was created under.
    pub policy: String,
    pub title: String,
    pub description: String,
    pub tally: Tally,
    /// Threshold snapshotted from the policy at creation.
    pub success_vote_percent: u64,
    /// Voting window length snapshotted from the policy at creation.
    pub duration: u64,
    pub start: Timestamp,
    pub end: Timestamp,
    pub votes: BTreeMap<AccountAddress, VoteRecord>,
    pub result: ProposalResult,
    pub executed: bool,
    pub action: ProposalAction,
}

impl Proposal {
    pub fn kind(&self) -> ProposalKind {
        self.action.kind()
    }

    /// Whether votes are still accepted at `now`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        now < self.end
    }

    pub fn vote_of(&self, voter: &AccountAddress) -> Option<&VoteRecord> {
        self.votes.get(voter)
    }

    /// Sum of every recorded vote weight.
    pub fn recorded_weight(&self) -> u128 {
        self.votes.values().map(|r| u128::from(r.weight)).sum()
    }
}
