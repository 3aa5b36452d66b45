//! Execution engine: closes a proposal after its voting window and applies
//! its action when the weighted "for" tally met the threshold.
//!
//! Two entry points exist: [`execute`](GovernanceEngine::execute) settles
//! every kind except currency transfers, which need the currency as a type
//! parameter and go through
//! [`execute_currency_transfer`](GovernanceEngine::execute_currency_transfer).
//!
//! Settlement order: all validation, then registry/charter writes staged into
//! one batch, then the treasury payout on the ledger, then the batch commit,
//! then events.

use crate::codec::encode;
use crate::engine::{ExecutionGuard, GovernanceEngine};
use crate::error::{GovernanceError, Result};
use crate::organization::Organization;
use crate::proposal::{PolicyChange, Proposal, ProposalAction};
use quorum_store::{GovernanceBatch, GovernanceStore};
use quorum_types::{
    AccountAddress, Asset, Clock, Currency, CurrencyName, EventSink, GovernanceEvent, Ledger,
    ProposalId, ProposalKind, ProposalResult, BPS_DENOMINATOR,
};

/// Votes needed to pass: `floor(total_supply * threshold_bps / 10000)`.
pub fn required_votes(total_supply: u128, threshold_bps: u64) -> Result<u128> {
    let scaled = total_supply
        .checked_mul(u128::from(threshold_bps))
        .ok_or(GovernanceError::Overflow)?;
    Ok(scaled / u128::from(BPS_DENOMINATOR))
}

/// A proposal whose window has closed, with the votes it needed.
struct Closing {
    proposal: Proposal,
    organization: Organization,
    required: u128,
}

impl Closing {
    fn passed(&self) -> bool {
        self.proposal.tally.votes_for >= self.required
    }
}

/// Side effects staged for a successful proposal.
#[derive(Default)]
struct Settlement {
    batch: GovernanceBatch,
    payout: Option<(Asset, AccountAddress, u64)>,
    events: Vec<GovernanceEvent>,
}

impl<S, L, C, E> GovernanceEngine<S, L, C, E>
where
    S: GovernanceStore,
    L: Ledger,
    C: Clock,
    E: EventSink,
{
    /// Settle a standard, asset-transfer, policy-update or charter-update
    /// proposal. Returns the final result.
    pub fn execute(&mut self, id: ProposalId) -> Result<ProposalResult> {
        let closing = self.close(id)?;
        if closing.proposal.kind() == ProposalKind::CurrencyTransfer {
            tracing::warn!(
                proposal = id,
                "currency transfer must be settled through execute_currency_transfer"
            );
            return Err(GovernanceError::WrongExecuteEntryPoint(id));
        }
        let mut settlement = Settlement::default();

        if closing.passed() {
            let Closing {
                proposal,
                organization,
                ..
            } = &closing;
            match &proposal.action {
                ProposalAction::Standard => {}
                ProposalAction::AssetTransfer {
                    asset,
                    recipient,
                    amount,
                } => {
                    let asset = Asset::Token(asset.clone());
                    organization
                        .treasury
                        .ensure_funds(&self.ledger, &asset, *amount)?;
                    settlement.payout = Some((asset, recipient.clone(), *amount));
                }
                ProposalAction::CurrencyTransfer { .. } => {
                    return Err(GovernanceError::WrongExecuteEntryPoint(id));
                }
                ProposalAction::PolicyUpdate { policy, change } => {
                    let registry = self.registry();
                    let event = match change {
                        PolicyChange::Update(params) => {
                            registry.register_or_replace(&mut settlement.batch, policy, params)?;
                            GovernanceEvent::PolicyUpdated {
                                proposal: id,
                                policy: policy.clone(),
                            }
                        }
                        PolicyChange::Remove => {
                            registry.remove(&mut settlement.batch, policy)?;
                            GovernanceEvent::PolicyRemoved {
                                proposal: id,
                                policy: policy.clone(),
                            }
                        }
                    };
                    settlement.events.push(event);
                }
                ProposalAction::CharterUpdate(update) => {
                    let mut organization = organization.clone();
                    organization.charter.apply(update);
                    settlement
                        .batch
                        .put_organization(encode(&organization)?);
                    settlement
                        .events
                        .push(GovernanceEvent::CharterUpdated { proposal: id });
                }
            }
        }

        self.settle(closing, settlement)
    }

    /// Settle a currency-transfer proposal, paying out in currency `Cur`.
    ///
    /// `Cur`'s canonical name must equal the name recorded when the proposal
    /// was created. The treasury is registered for `Cur` on first use.
    pub fn execute_currency_transfer<Cur: Currency>(
        &mut self,
        id: ProposalId,
    ) -> Result<ProposalResult> {
        let closing = self.close(id)?;

        let ProposalAction::CurrencyTransfer {
            currency,
            recipient,
            amount,
        } = &closing.proposal.action
        else {
            tracing::warn!(
                proposal = id,
                kind = %closing.proposal.kind(),
                "only currency transfers settle through execute_currency_transfer"
            );
            return Err(GovernanceError::WrongExecuteEntryPoint(id));
        };

        let provided = CurrencyName::of::<Cur>();
        if *currency != provided {
            tracing::warn!(proposal = id, expected = %currency, %provided, "currency mismatch");
            return Err(GovernanceError::CurrencyTypeMismatch {
                expected: currency.to_string(),
                provided: provided.to_string(),
            });
        }

        let mut settlement = Settlement::default();
        if closing.passed() {
            let asset = Asset::Currency(provided);
            let treasury = &closing.organization.treasury;
            treasury.ensure_funds(&self.ledger, &asset, *amount)?;
            treasury.ensure_registered(&self.ledger, &asset)?;
            settlement.payout = Some((asset, recipient.clone(), *amount));
        }

        self.settle(closing, settlement)
    }

    /// Steps shared by both entry points: resolve, check the window, apply
    /// the double-execution guard and compute the votes required.
    fn close(&self, id: ProposalId) -> Result<Closing> {
        let proposal = self.proposal(id)?;

        let now = self.clock.now();
        if proposal.is_open(now) {
            return Err(GovernanceError::ProposalNotEnded(id));
        }

        if proposal.executed {
            tracing::warn!(
                proposal = id,
                result = %proposal.result,
                guard = ?self.options.execution_guard,
                "re-execution of a settled proposal"
            );
            if self.options.execution_guard == ExecutionGuard::Reject {
                return Err(GovernanceError::AlreadyExecuted(id));
            }
        }

        let organization = self.organization_info()?;
        let supply = self.ledger.total_supply(organization.governance_token())?;
        let required = required_votes(supply, proposal.success_vote_percent)?;
        tracing::debug!(
            proposal = id,
            votes_for = %proposal.tally.votes_for,
            %required,
            %supply,
            threshold_bps = proposal.success_vote_percent,
            "threshold computed"
        );

        Ok(Closing {
            proposal,
            organization,
            required,
        })
    }

    /// Record the outcome, pay out, commit and notify.
    ///
    /// The ledger transfer and the store commit are not one transaction: if
    /// the commit fails after a payout, the funds have moved while the
    /// proposal stays unexecuted, and a retry would pay again. This ordering
    /// relies on the host runtime making the whole call atomic.
    fn settle(&mut self, closing: Closing, settlement: Settlement) -> Result<ProposalResult> {
        let passed = closing.passed();
        let Closing {
            mut proposal,
            organization,
            required,
        } = closing;
        let Settlement {
            mut batch,
            payout,
            mut events,
        } = settlement;
        let id = proposal.id;

        proposal.result = if passed {
            ProposalResult::Success
        } else {
            ProposalResult::Fail
        };
        proposal.executed = true;
        self.stage_proposal(&mut batch, &proposal)?;

        if let Some((asset, recipient, amount)) = payout {
            organization
                .treasury
                .pay(&self.ledger, &asset, &recipient, amount)?;
            events.push(GovernanceEvent::TreasuryTransfer {
                proposal: id,
                asset,
                recipient,
                amount,
            });
        }

        self.store.commit(batch)?;

        tracing::info!(
            proposal = id,
            result = %proposal.result,
            votes_for = %proposal.tally.votes_for,
            %required,
            "proposal executed"
        );
        for event in events {
            self.events.emit(event);
        }
        self.events.emit(GovernanceEvent::ProposalExecuted {
            proposal: id,
            result: proposal.result,
            votes_for: proposal.tally.votes_for,
            required,
            timestamp: self.clock.now(),
        });
        Ok(proposal.result)
    }
}
