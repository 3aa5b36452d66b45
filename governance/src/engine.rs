//! The governance engine: the context every operation runs against.
//!
//! One engine owns the state of one running organization: its store and its
//! handles to the ledger, clock and event sink. State-mutating operations take
//! `&mut self`, so they are serialized by construction; each one stages its
//! writes into a single [`GovernanceBatch`] and commits it at the end, so an
//! operation that fails leaves no trace in the store.

use crate::codec::{decode, encode};
use crate::config::GovernanceConfig;
use crate::error::{GovernanceError, Result};
use crate::organization::{Charter, Organization};
use crate::policy::{PolicyParams, ProposalTypeRegistry};
use crate::proposal::{Proposal, VoteRecord};
use crate::treasury::Treasury;
use quorum_store::{GovernanceBatch, GovernanceStore};
use quorum_types::{
    AccountAddress, Asset, Clock, EventSink, GovernanceEvent, Ledger, ProposalId, ProposalKind,
};
use serde::{Deserialize, Serialize};

/// Whether an account may replace its vote on a proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotePolicy {
    /// One vote per account per proposal; a second vote fails.
    #[default]
    Single,
    /// A later vote replaces the earlier one, re-weighted at the new balance.
    Revote,
}

/// What to do when an already-executed proposal is executed again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionGuard {
    /// Fail with [`GovernanceError::AlreadyExecuted`].
    #[default]
    Reject,
    /// Settle again against the current supply, re-applying the action.
    Allow,
}

/// Behavioural switches of an engine instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub vote_policy: VotePolicy,
    pub execution_guard: ExecutionGuard,
}

pub struct GovernanceEngine<S, L, C, E> {
    pub(crate) store: S,
    pub(crate) ledger: L,
    pub(crate) clock: C,
    pub(crate) events: E,
    pub(crate) options: EngineOptions,
}

impl<S, L, C, E> GovernanceEngine<S, L, C, E>
where
    S: GovernanceStore,
    L: Ledger,
    C: Clock,
    E: EventSink,
{
    pub fn new(store: S, ledger: L, clock: C, events: E, options: EngineOptions) -> Self {
        Self {
            store,
            ledger,
            clock,
            events,
            options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Tear the engine down, handing back its collaborators.
    pub fn into_parts(self) -> (S, L, C, E) {
        (self.store, self.ledger, self.clock, self.events)
    }

    /// Create the organization with its charter, treasury and first policy.
    ///
    /// One-time setup: fails with [`GovernanceError::AlreadyInitialized`]
    /// if an organization already exists in the store.
    pub fn initialize(
        &mut self,
        creator: &AccountAddress,
        charter: Charter,
        treasury: AccountAddress,
        default_policy: &str,
        params: PolicyParams,
    ) -> Result<()> {
        if self.store.get_organization()?.is_some() {
            tracing::warn!(%creator, "rejected second organization initialization");
            return Err(GovernanceError::AlreadyInitialized);
        }

        let organization = Organization {
            creator: creator.clone(),
            charter,
            treasury: Treasury::new(treasury),
        };

        let mut batch = GovernanceBatch::new();
        batch.put_organization(encode(&organization)?);
        self.registry()
            .register_or_replace(&mut batch, default_policy, &params)?;
        self.store.commit(batch)?;

        tracing::info!(
            %creator,
            name = %organization.charter.name,
            token = %organization.charter.governance_token,
            treasury = %organization.treasury.account(),
            policy = default_policy,
            "organization initialized"
        );
        self.events.emit(GovernanceEvent::OrganizationInitialized {
            creator: creator.clone(),
            name: organization.charter.name.clone(),
            governance_token: organization.charter.governance_token.clone(),
            treasury: organization.treasury.account().clone(),
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    /// [`initialize`](Self::initialize) with the charter, treasury and
    /// default policy taken from `config`.
    pub fn initialize_from_config(
        &mut self,
        creator: &AccountAddress,
        config: &GovernanceConfig,
    ) -> Result<()> {
        let (name, params) = config.default_policy();
        self.initialize(creator, config.charter(), config.treasury(), name, params)
    }

    // ── Views ──────────────────────────────────────────────────────────

    /// The organization's charter, creator and treasury.
    pub fn organization_info(&self) -> Result<Organization> {
        match self.store.get_organization()? {
            Some(bytes) => decode(&bytes),
            None => Err(GovernanceError::NotInitialized),
        }
    }

    /// The identifier the next proposal will receive.
    pub fn next_proposal_id(&self) -> Result<ProposalId> {
        Ok(self.store.next_proposal_id()?)
    }

    /// Parameters of a policy by name.
    pub fn policy(&self, name: &str) -> Result<PolicyParams> {
        self.registry().lookup(name)
    }

    /// All policies, ordered by name.
    pub fn policies(&self) -> Result<Vec<(String, PolicyParams)>> {
        self.registry().list()
    }

    /// Full proposal detail by identifier.
    pub fn proposal(&self, id: ProposalId) -> Result<Proposal> {
        let proposer = self
            .store
            .proposer_of(id)?
            .ok_or(GovernanceError::UnknownProposal(id))?;
        let bytes = self
            .store
            .get_proposal(id)?
            .ok_or(GovernanceError::UnknownProposal(id))?;
        let proposal: Proposal = decode(&bytes)?;
        if proposal.proposer != proposer {
            return Err(GovernanceError::Codec(format!(
                "proposal {id} is registered to {proposer} but records {}",
                proposal.proposer
            )));
        }
        Ok(proposal)
    }

    pub fn proposal_kind(&self, id: ProposalId) -> Result<ProposalKind> {
        Ok(self.proposal(id)?.kind())
    }

    /// A voter's recorded vote on a proposal, if any.
    pub fn vote_of(&self, id: ProposalId, voter: &AccountAddress) -> Result<Option<VoteRecord>> {
        Ok(self.proposal(id)?.vote_of(voter).copied())
    }

    /// Every proposal created by `proposer`, in creation order.
    pub fn proposals_by(&self, proposer: &AccountAddress) -> Result<Vec<Proposal>> {
        self.store
            .proposals_by(proposer)?
            .into_iter()
            .map(|id| self.proposal(id))
            .collect()
    }

    // ── Shared helpers ─────────────────────────────────────────────────

    pub(crate) fn registry(&self) -> ProposalTypeRegistry<'_, S> {
        ProposalTypeRegistry::new(&self.store)
    }

    /// Current governance-token balance of `account`.
    pub(crate) fn voting_power(
        &self,
        organization: &Organization,
        account: &AccountAddress,
    ) -> Result<u64> {
        let token = Asset::Token(organization.governance_token().clone());
        Ok(self.ledger.balance(account, &token)?)
    }

    pub(crate) fn stage_proposal(&self, batch: &mut GovernanceBatch, proposal: &Proposal) -> Result<()> {
        batch.put_proposal(proposal.id, proposal.proposer.clone(), encode(proposal)?);
        Ok(())
    }
}
