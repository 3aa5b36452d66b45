//! Voting engine: one weighted vote per account per proposal.

use crate::engine::{GovernanceEngine, VotePolicy};
use crate::error::{GovernanceError, Result};
use crate::proposal::VoteRecord;
use quorum_store::{GovernanceBatch, GovernanceStore};
use quorum_types::{
    AccountAddress, Clock, EventSink, GovernanceEvent, Ledger, ProposalId, VoteOption,
};

impl<S, L, C, E> GovernanceEngine<S, L, C, E>
where
    S: GovernanceStore,
    L: Ledger,
    C: Clock,
    E: EventSink,
{
    /// Cast `voter`'s vote on proposal `id`.
    ///
    /// The vote is weighted by the voter's governance-token balance at this
    /// moment; the weight is recorded and never re-read. Returns the recorded
    /// weight.
    pub fn vote(
        &mut self,
        voter: &AccountAddress,
        id: ProposalId,
        option: VoteOption,
    ) -> Result<u64> {
        let mut proposal = self.proposal(id)?;
        let organization = self.organization_info()?;
        let params = self.registry().lookup(&proposal.policy)?;

        let weight = self.voting_power(&organization, voter)?;
        if weight < params.min_amount_to_vote {
            return Err(GovernanceError::InsufficientGovernanceTokens {
                account: voter.clone(),
                have: weight,
                need: params.min_amount_to_vote,
            });
        }

        let now = self.clock.now();
        if !proposal.is_open(now) {
            tracing::debug!(proposal = id, %voter, %now, end = %proposal.end, "vote after window");
            return Err(GovernanceError::ProposalExpired(id));
        }

        if let Some(previous) = proposal.vote_of(voter).copied() {
            match self.options.vote_policy {
                VotePolicy::Single => {
                    return Err(GovernanceError::AlreadyVoted {
                        proposal: id,
                        voter: voter.clone(),
                    });
                }
                VotePolicy::Revote => {
                    proposal.tally.retract(previous.option, previous.weight)?;
                    tracing::debug!(
                        proposal = id,
                        %voter,
                        option = %previous.option,
                        weight = previous.weight,
                        "retracted previous vote"
                    );
                }
            }
        }

        proposal.tally.add(option, weight)?;
        proposal
            .votes
            .insert(voter.clone(), VoteRecord { option, weight });

        let mut batch = GovernanceBatch::new();
        self.stage_proposal(&mut batch, &proposal)?;
        self.store.commit(batch)?;

        tracing::info!(
            proposal = id,
            %voter,
            %option,
            weight,
            votes_for = %proposal.tally.votes_for,
            total_votes = %proposal.tally.total_votes,
            "vote cast"
        );
        self.events.emit(GovernanceEvent::VoteCast {
            proposal: id,
            voter: voter.clone(),
            option,
            weight,
            timestamp: now,
        });
        Ok(weight)
    }

    /// [`vote`](Self::vote) with the option given as its wire value
    /// (0 = against, 1 = for, 2 = abstain).
    pub fn vote_raw(&mut self, voter: &AccountAddress, id: ProposalId, option: u8) -> Result<u64> {
        let option = VoteOption::try_from(option).map_err(GovernanceError::InvalidVoteOption)?;
        self.vote(voter, id, option)
    }
}
