//! The proposal type registry: named voting policies.
//!
//! A policy fixes how long a proposal stays open, what share of the
//! governance token supply must vote "for" it, and the minimum balances
//! needed to vote and to propose. Proposals snapshot the duration and
//! threshold at creation, so editing a policy never affects proposals
//! already in flight.

use crate::codec::{decode, encode};
use crate::error::{GovernanceError, Result};
use quorum_store::{GovernanceBatch, GovernanceStore};
use serde::{Deserialize, Serialize};

/// Parameters of one voting policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyParams {
    /// Voting window length in seconds.
    pub duration: u64,
    /// Approval threshold in parts-per-ten-thousand of total token supply.
    pub success_vote_percent: u64,
    /// Minimum governance-token balance needed to cast a vote.
    pub min_amount_to_vote: u64,
    /// Minimum governance-token balance needed to create a proposal.
    pub min_amount_to_create_proposal: u64,
}

/// Typed access to the policy entries of a [`GovernanceStore`].
///
/// Mutations are staged into a [`GovernanceBatch`]; nothing is written until
/// the caller commits it.
pub struct ProposalTypeRegistry<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S: GovernanceStore + ?Sized> ProposalTypeRegistry<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Fetch a policy by name.
    pub fn lookup(&self, name: &str) -> Result<PolicyParams> {
        match self.store.get_policy(name)? {
            Some(bytes) => decode(&bytes),
            None => Err(GovernanceError::UnknownPolicy(name.to_string())),
        }
    }

    /// Every policy, ordered by name.
    pub fn list(&self) -> Result<Vec<(String, PolicyParams)>> {
        self.store
            .list_policies()?
            .into_iter()
            .map(|(name, bytes)| Ok((name, decode(&bytes)?)))
            .collect()
    }

    /// Insert or replace a policy. No validation beyond the parameter types.
    pub fn register_or_replace(
        &self,
        batch: &mut GovernanceBatch,
        name: &str,
        params: &PolicyParams,
    ) -> Result<()> {
        batch.put_policy(name, encode(params)?);
        Ok(())
    }

    /// Remove a policy. The last remaining policy can never be removed.
    pub fn remove(&self, batch: &mut GovernanceBatch, name: &str) -> Result<()> {
        if self.store.policy_count()? <= 1 {
            return Err(GovernanceError::AtLeastOnePolicyRequired);
        }
        if self.store.get_policy(name)?.is_none() {
            return Err(GovernanceError::UnknownPolicy(name.to_string()));
        }
        batch.delete_policy(name);
        Ok(())
    }
}
