//! Proposal factory: eligibility checks and construction of new proposals.

use crate::engine::GovernanceEngine;
use crate::error::{GovernanceError, Result};
use crate::organization::CharterUpdate;
use crate::policy::PolicyParams;
use crate::proposal::{PolicyChange, Proposal, ProposalAction, Tally};
use quorum_store::{GovernanceBatch, GovernanceStore};
use quorum_types::{
    AccountAddress, AssetId, Clock, Currency, CurrencyName, EventSink, GovernanceEvent, Ledger,
    ProposalId, ProposalResult,
};
use std::collections::BTreeMap;

/// The fields every proposal kind shares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
    /// Name of the policy the proposal is governed by.
    pub policy: String,
}

impl ProposalDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        policy: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            policy: policy.into(),
        }
    }
}

impl<S, L, C, E> GovernanceEngine<S, L, C, E>
where
    S: GovernanceStore,
    L: Ledger,
    C: Clock,
    E: EventSink,
{
    /// A signalling proposal with no side effect.
    pub fn create_standard_proposal(
        &mut self,
        proposer: &AccountAddress,
        draft: ProposalDraft,
    ) -> Result<ProposalId> {
        self.create(proposer, draft, || Ok(ProposalAction::Standard))
    }

    /// Pay `amount` of `asset` from the treasury to `recipient` on success.
    pub fn create_asset_transfer_proposal(
        &mut self,
        proposer: &AccountAddress,
        draft: ProposalDraft,
        asset: AssetId,
        recipient: AccountAddress,
        amount: u64,
    ) -> Result<ProposalId> {
        self.create(proposer, draft, || {
            Ok(ProposalAction::AssetTransfer {
                asset,
                recipient,
                amount,
            })
        })
    }

    /// Pay `amount` of currency `Cur` from the treasury to `recipient` on
    /// success. The currency's canonical name is recorded now and checked
    /// again at settlement.
    pub fn create_currency_transfer_proposal<Cur: Currency>(
        &mut self,
        proposer: &AccountAddress,
        draft: ProposalDraft,
        recipient: AccountAddress,
        amount: u64,
    ) -> Result<ProposalId> {
        self.create(proposer, draft, || {
            Ok(ProposalAction::CurrencyTransfer {
                currency: CurrencyName::of::<Cur>(),
                recipient,
                amount,
            })
        })
    }

    /// Change the proposal type registry on success.
    ///
    /// `update_mode` must be `"update"` (which needs `params`) or `"remove"`.
    pub fn create_policy_update_proposal(
        &mut self,
        proposer: &AccountAddress,
        draft: ProposalDraft,
        policy: impl Into<String>,
        update_mode: &str,
        params: Option<PolicyParams>,
    ) -> Result<ProposalId> {
        self.create(proposer, draft, || {
            Ok(ProposalAction::PolicyUpdate {
                policy: policy.into(),
                change: PolicyChange::from_mode(update_mode, params)?,
            })
        })
    }

    /// Overwrite the supplied charter fields on success.
    pub fn create_charter_update_proposal(
        &mut self,
        proposer: &AccountAddress,
        draft: ProposalDraft,
        update: CharterUpdate,
    ) -> Result<ProposalId> {
        self.create(proposer, draft, || Ok(ProposalAction::CharterUpdate(update)))
    }

    /// Shared creation path. The action is only built once the policy and
    /// proposer eligibility have been checked.
    fn create(
        &mut self,
        proposer: &AccountAddress,
        draft: ProposalDraft,
        action: impl FnOnce() -> Result<ProposalAction>,
    ) -> Result<ProposalId> {
        let organization = self.organization_info()?;
        let params = self.registry().lookup(&draft.policy)?;

        let balance = self.voting_power(&organization, proposer)?;
        if balance < params.min_amount_to_create_proposal {
            tracing::debug!(
                %proposer,
                balance,
                need = params.min_amount_to_create_proposal,
                "proposer below creation minimum"
            );
            return Err(GovernanceError::InsufficientGovernanceTokens {
                account: proposer.clone(),
                have: balance,
                need: params.min_amount_to_create_proposal,
            });
        }

        let action = action()?;

        let id = self.store.next_proposal_id()?;
        let next = id.checked_add(1).ok_or(GovernanceError::Overflow)?;
        let start = self.clock.now();
        let end = start
            .checked_add_secs(params.duration)
            .ok_or(GovernanceError::Overflow)?;

        let proposal = Proposal {
            id,
            proposer: proposer.clone(),
            policy: draft.policy,
            title: draft.title,
            description: draft.description,
            tally: Tally::default(),
            success_vote_percent: params.success_vote_percent,
            duration: params.duration,
            start,
            end,
            votes: BTreeMap::new(),
            result: ProposalResult::Pending,
            executed: false,
            action,
        };

        let mut batch = GovernanceBatch::new();
        self.stage_proposal(&mut batch, &proposal)?;
        batch.set_next_proposal_id(next);
        self.store.commit(batch)?;

        tracing::info!(
            proposal = id,
            %proposer,
            policy = %proposal.policy,
            kind = %proposal.kind(),
            %start,
            %end,
            "proposal created"
        );
        self.events.emit(GovernanceEvent::ProposalCreated {
            proposal: id,
            proposer: proposer.clone(),
            policy: proposal.policy,
            kind: proposal.action.kind(),
            title: proposal.title,
            start,
            end,
        });
        Ok(id)
    }
}
