//! Proposal identifiers, vote options and outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Globally unique, strictly increasing proposal identifier.
pub type ProposalId = u64;

/// A voter's choice on a proposal.
///
/// The wire encoding is `0 = against`, `1 = for`, `2 = abstain`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOption {
    Against,
    For,
    Abstain,
}

impl VoteOption {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Against => 0,
            Self::For => 1,
            Self::Abstain => 2,
        }
    }
}

impl TryFrom<u8> for VoteOption {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Against),
            1 => Ok(Self::For),
            2 => Ok(Self::Abstain),
            other => Err(other),
        }
    }
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Against => "against",
            Self::For => "for",
            Self::Abstain => "abstain",
        };
        f.write_str(s)
    }
}

/// Outcome of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalResult {
    /// Not yet settled.
    Pending,
    /// The weighted "for" tally met the threshold; the action was applied.
    Success,
    /// The threshold was not met; no action was applied.
    Fail,
}

impl ProposalResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ProposalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Fail => "FAIL",
        };
        f.write_str(s)
    }
}

/// The action kind (tag) of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalKind {
    Standard,
    AssetTransfer,
    CurrencyTransfer,
    PolicyUpdate,
    CharterUpdate,
}

impl ProposalKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::AssetTransfer => "asset-transfer",
            Self::CurrencyTransfer => "currency-transfer",
            Self::PolicyUpdate => "policy-update",
            Self::CharterUpdate => "charter-update",
        }
    }
}

impl fmt::Display for ProposalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_option_wire_encoding() {
        for option in [VoteOption::Against, VoteOption::For, VoteOption::Abstain] {
            assert_eq!(VoteOption::try_from(option.as_u8()), Ok(option));
        }
        assert_eq!(VoteOption::try_from(3), Err(3));
    }

    #[test]
    fn only_pending_is_not_terminal() {
        assert!(!ProposalResult::Pending.is_terminal());
        assert!(ProposalResult::Success.is_terminal());
        assert!(ProposalResult::Fail.is_terminal());
    }
}
