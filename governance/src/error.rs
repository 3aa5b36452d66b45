use quorum_store::StoreError;
use quorum_types::{AccountAddress, LedgerError, ProposalId};
use thiserror::Error;

/// Failure class of a [`GovernanceError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// One-time setup was attempted twice.
    Authorization,
    /// The caller does not hold enough governance tokens.
    Eligibility,
    /// Unknown policy, bad update mode, or an attempt to empty the policy table.
    Policy,
    /// The operation is outside the proposal's voting window.
    Timing,
    /// Duplicate or malformed vote.
    Vote,
    /// The proposal cannot be settled through this entry point.
    ActionRouting,
    /// An optional payload field was needed but never supplied.
    OptionalField,
    /// The organization or proposal does not exist.
    NotFound,
    /// Checked arithmetic overflowed.
    Arithmetic,
    /// Ledger, storage or encoding failure.
    Infrastructure,
}

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("organization is already initialized")]
    AlreadyInitialized,

    #[error("organization has not been initialized")]
    NotInitialized,

    #[error("{account} holds {have} governance tokens, {need} required")]
    InsufficientGovernanceTokens {
        account: AccountAddress,
        have: u64,
        need: u64,
    },

    #[error("unknown policy: {0}")]
    UnknownPolicy(String),

    #[error("invalid policy update mode {0:?}: expected \"update\" or \"remove\"")]
    InvalidUpdateMode(String),

    #[error("at least one policy must remain")]
    AtLeastOnePolicyRequired,

    #[error("required field {0} was not supplied")]
    MissingField(&'static str),

    #[error("proposal {0} has expired")]
    ProposalExpired(ProposalId),

    #[error("voting on proposal {0} has not ended yet")]
    ProposalNotEnded(ProposalId),

    #[error("{voter} has already voted on proposal {proposal}")]
    AlreadyVoted {
        proposal: ProposalId,
        voter: AccountAddress,
    },

    #[error("invalid vote option: {0}")]
    InvalidVoteOption(u8),

    #[error("proposal {0} not found")]
    UnknownProposal(ProposalId),

    #[error("proposal {0} cannot be settled through this entry point")]
    WrongExecuteEntryPoint(ProposalId),

    #[error("currency mismatch: proposal names {expected}, caller supplied {provided}")]
    CurrencyTypeMismatch { expected: String, provided: String },

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(ProposalId),

    #[error("treasury holds {available} of {asset}, {needed} required")]
    InsufficientTreasuryBalance {
        asset: String,
        needed: u64,
        available: u64,
    },

    #[error("arithmetic overflow in governance computation")]
    Overflow,

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("codec error: {0}")]
    Codec(String),
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyInitialized => ErrorKind::Authorization,
            Self::InsufficientGovernanceTokens { .. } => ErrorKind::Eligibility,
            Self::UnknownPolicy(_) | Self::InvalidUpdateMode(_) | Self::AtLeastOnePolicyRequired => {
                ErrorKind::Policy
            }
            Self::ProposalExpired(_) | Self::ProposalNotEnded(_) => ErrorKind::Timing,
            Self::AlreadyVoted { .. } | Self::InvalidVoteOption(_) => ErrorKind::Vote,
            Self::WrongExecuteEntryPoint(_)
            | Self::CurrencyTypeMismatch { .. }
            | Self::AlreadyExecuted(_) => ErrorKind::ActionRouting,
            Self::MissingField(_) => ErrorKind::OptionalField,
            Self::NotInitialized | Self::UnknownProposal(_) => ErrorKind::NotFound,
            Self::Overflow => ErrorKind::Arithmetic,
            Self::InsufficientTreasuryBalance { .. }
            | Self::Ledger(_)
            | Self::Store(_)
            | Self::Codec(_) => ErrorKind::Infrastructure,
        }
    }

    /// Stable numeric code, distinct per condition.
    pub fn code(&self) -> u32 {
        match self {
            Self::AlreadyInitialized => 1,
            Self::NotInitialized => 2,
            Self::InsufficientGovernanceTokens { .. } => 3,
            Self::UnknownPolicy(_) => 4,
            Self::InvalidUpdateMode(_) => 5,
            Self::AtLeastOnePolicyRequired => 6,
            Self::MissingField(_) => 7,
            Self::ProposalExpired(_) => 8,
            Self::ProposalNotEnded(_) => 9,
            Self::AlreadyVoted { .. } => 10,
            Self::InvalidVoteOption(_) => 11,
            Self::UnknownProposal(_) => 12,
            Self::WrongExecuteEntryPoint(_) => 13,
            Self::CurrencyTypeMismatch { .. } => 14,
            Self::AlreadyExecuted(_) => 15,
            Self::InsufficientTreasuryBalance { .. } => 16,
            Self::Overflow => 17,
            Self::Ledger(_) => 100,
            Self::Store(_) => 101,
            Self::Codec(_) => 102,
        }
    }
}

pub type Result<T> = std::result::Result<T, GovernanceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn samples() -> Vec<GovernanceError> {
        let who = AccountAddress::new("alice");
        vec![
            GovernanceError::AlreadyInitialized,
            GovernanceError::NotInitialized,
            GovernanceError::InsufficientGovernanceTokens {
                account: who.clone(),
                have: 1,
                need: 2,
            },
            GovernanceError::UnknownPolicy("x".into()),
            GovernanceError::InvalidUpdateMode("upsert".into()),
            GovernanceError::AtLeastOnePolicyRequired,
            GovernanceError::MissingField("policy parameters"),
            GovernanceError::ProposalExpired(0),
            GovernanceError::ProposalNotEnded(0),
            GovernanceError::AlreadyVoted {
                proposal: 0,
                voter: who,
            },
            GovernanceError::InvalidVoteOption(9),
            GovernanceError::UnknownProposal(0),
            GovernanceError::WrongExecuteEntryPoint(0),
            GovernanceError::CurrencyTypeMismatch {
                expected: "a".into(),
                provided: "b".into(),
            },
            GovernanceError::AlreadyExecuted(0),
            GovernanceError::InsufficientTreasuryBalance {
                asset: "gov".into(),
                needed: 2,
                available: 1,
            },
            GovernanceError::Overflow,
            GovernanceError::Ledger(LedgerError::Backend("down".into())),
            GovernanceError::Store(StoreError::Backend("down".into())),
            GovernanceError::Codec("bad".into()),
        ]
    }

    #[test]
    fn codes_are_distinct() {
        let all = samples();
        let codes: HashSet<u32> = all.iter().map(GovernanceError::code).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn taxonomy_classes() {
        assert_eq!(GovernanceError::AlreadyInitialized.kind(), ErrorKind::Authorization);
        assert_eq!(GovernanceError::AtLeastOnePolicyRequired.kind(), ErrorKind::Policy);
        assert_eq!(GovernanceError::ProposalExpired(1).kind(), ErrorKind::Timing);
        assert_eq!(GovernanceError::WrongExecuteEntryPoint(1).kind(), ErrorKind::ActionRouting);
        assert_eq!(GovernanceError::MissingField("x").kind(), ErrorKind::OptionalField);
    }
}
