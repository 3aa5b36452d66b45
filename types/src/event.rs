//! Governance notifications and the sink they are delivered to.

use crate::{AccountAddress, Asset, AssetId, ProposalId, ProposalKind, ProposalResult, Timestamp, VoteOption};
use serde::{Deserialize, Serialize};

/// A notification emitted after a state transition has been committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GovernanceEvent {
    OrganizationInitialized {
        creator: AccountAddress,
        name: String,
        governance_token: AssetId,
        treasury: AccountAddress,
        timestamp: Timestamp,
    },
    ProposalCreated {
        proposal: ProposalId,
        proposer: AccountAddress,
        policy: String,
        kind: ProposalKind,
        title: String,
        start: Timestamp,
        end: Timestamp,
    },
    VoteCast {
        proposal: ProposalId,
        voter: AccountAddress,
        option: VoteOption,
        weight: u64,
        timestamp: Timestamp,
    },
    ProposalExecuted {
        proposal: ProposalId,
        result: ProposalResult,
        votes_for: u128,
        required: u128,
        timestamp: Timestamp,
    },
    PolicyUpdated {
        proposal: ProposalId,
        policy: String,
    },
    PolicyRemoved {
        proposal: ProposalId,
        policy: String,
    },
    CharterUpdated {
        proposal: ProposalId,
    },
    TreasuryTransfer {
        proposal: ProposalId,
        asset: Asset,
        recipient: AccountAddress,
        amount: u64,
    },
}

impl GovernanceEvent {
    /// The proposal this event concerns, if any.
    pub fn proposal(&self) -> Option<ProposalId> {
        match self {
            Self::OrganizationInitialized { .. } => None,
            Self::ProposalCreated { proposal, .. }
            | Self::VoteCast { proposal, .. }
            | Self::ProposalExecuted { proposal, .. }
            | Self::PolicyUpdated { proposal, .. }
            | Self::PolicyRemoved { proposal, .. }
            | Self::CharterUpdated { proposal }
            | Self::TreasuryTransfer { proposal, .. } => Some(*proposal),
        }
    }
}

/// Append-only destination for governance events.
pub trait EventSink {
    fn emit(&self, event: GovernanceEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = GovernanceEvent::CharterUpdated { proposal: 7 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"charter_updated","proposal":7}"#);
        assert_eq!(event.proposal(), Some(7));
    }
}
