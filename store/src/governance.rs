//! Governance storage trait.
//!
//! Records are opaque byte strings here; encoding is the engine's concern.
//! Reads are individual lookups, writes are only ever applied as a whole
//! [`GovernanceBatch`] so that each governance operation commits all of its
//! writes or none of them.

use crate::StoreError;
use quorum_types::{AccountAddress, ProposalId};

/// A single write inside a [`GovernanceBatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GovernanceWrite {
    /// Replace the organization record.
    PutOrganization(Vec<u8>),
    /// Insert or replace a policy entry.
    PutPolicy { name: String, data: Vec<u8> },
    /// Remove a policy entry.
    DeletePolicy(String),
    /// Insert or replace a proposal.
    ///
    /// The first put of an id also records `id → proposer` in the proposal
    /// registry and appends the id to the proposer's collection. Later puts of
    /// the same id must name the same proposer.
    PutProposal {
        id: ProposalId,
        proposer: AccountAddress,
        data: Vec<u8>,
    },
    /// Advance the next-proposal-id counter. It never moves backwards.
    SetNextProposalId(ProposalId),
}

/// An ordered group of writes applied atomically by [`GovernanceStore::commit`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GovernanceBatch {
    writes: Vec<GovernanceWrite>,
}

impl GovernanceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_organization(&mut self, data: Vec<u8>) -> &mut Self {
        self.writes.push(GovernanceWrite::PutOrganization(data));
        self
    }

    pub fn put_policy(&mut self, name: impl Into<String>, data: Vec<u8>) -> &mut Self {
        self.writes.push(GovernanceWrite::PutPolicy {
            name: name.into(),
            data,
        });
        self
    }

    pub fn delete_policy(&mut self, name: impl Into<String>) -> &mut Self {
        self.writes.push(GovernanceWrite::DeletePolicy(name.into()));
        self
    }

    pub fn put_proposal(
        &mut self,
        id: ProposalId,
        proposer: AccountAddress,
        data: Vec<u8>,
    ) -> &mut Self {
        self.writes.push(GovernanceWrite::PutProposal { id, proposer, data });
        self
    }

    pub fn set_next_proposal_id(&mut self, next: ProposalId) -> &mut Self {
        self.writes.push(GovernanceWrite::SetNextProposalId(next));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn writes(&self) -> &[GovernanceWrite] {
        &self.writes
    }

    pub fn into_writes(self) -> Vec<GovernanceWrite> {
        self.writes
    }
}

/// Trait for storing governance state (organization, policies, proposals,
/// proposal registry).
pub trait GovernanceStore: Send + Sync {
    /// Get the organization record, if the organization has been initialized.
    fn get_organization(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Get a policy entry by name.
    fn get_policy(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// All policy entries, ordered by name.
    fn list_policies(&self) -> Result<Vec<(String, Vec<u8>)>, StoreError>;

    /// Number of policy entries.
    fn policy_count(&self) -> Result<u64, StoreError>;

    /// Get a proposal by id.
    fn get_proposal(&self, id: ProposalId) -> Result<Option<Vec<u8>>, StoreError>;

    /// Look up who created a proposal (the proposal registry).
    fn proposer_of(&self, id: ProposalId) -> Result<Option<AccountAddress>, StoreError>;

    /// Ids of every proposal created by `proposer`, in creation order.
    fn proposals_by(&self, proposer: &AccountAddress) -> Result<Vec<ProposalId>, StoreError>;

    /// The id the next proposal will receive. Zero on a fresh store.
    fn next_proposal_id(&self) -> Result<ProposalId, StoreError>;

    /// Apply every write in `batch`, or none of them.
    fn commit(&self, batch: GovernanceBatch) -> Result<(), StoreError>;
}
