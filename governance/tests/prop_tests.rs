mod common;

use common::*;
use proptest::prelude::*;

use quorum_governance::{
    required_votes, EngineOptions, GovernanceError, PolicyParams, ProposalDraft, VotePolicy,
};
use quorum_types::{ProposalResult, VoteOption};

fn open_policy(duration: u64, threshold: u64) -> PolicyParams {
    PolicyParams {
        duration,
        success_vote_percent: threshold,
        min_amount_to_vote: 0,
        min_amount_to_create_proposal: 0,
    }
}

fn engine_with_policy(options: EngineOptions, params: PolicyParams) -> TestEngine {
    let mut engine = uninitialized(options);
    engine
        .initialize(&addr("creator"), charter(), treasury(), "open", params)
        .expect("initialize");
    engine
}

fn open_draft(i: usize) -> ProposalDraft {
    ProposalDraft::new(format!("p{i}"), "", "open")
}

fn arb_option() -> impl Strategy<Value = VoteOption> {
    prop_oneof![
        Just(VoteOption::Against),
        Just(VoteOption::For),
        Just(VoteOption::Abstain),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Identifiers are issued 0, 1, 2, ... whoever the proposer is.
    #[test]
    fn ids_strictly_increase_across_proposers(proposers in prop::collection::vec(0usize..5, 1..30)) {
        let mut engine = engine_with_policy(EngineOptions::default(), open_policy(100, 30));
        let mut issued = Vec::new();
        for (i, p) in proposers.iter().enumerate() {
            let proposer = addr(&format!("member{p}"));
            issued.push(engine.create_standard_proposal(&proposer, open_draft(i)).unwrap());
        }
        prop_assert!(issued.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(issued.first().copied(), Some(0));
        prop_assert_eq!(engine.next_proposal_id().unwrap(), proposers.len() as u64);
    }

    /// Tallies always add up to the total and to the recorded weights,
    /// whether or not revoting is enabled.
    #[test]
    fn weight_is_conserved(
        revote in any::<bool>(),
        balances in prop::collection::vec(0u64..1_000_000_000, 1..6),
        ballots in prop::collection::vec((0usize..6, arb_option(), 0u64..1_000), 1..40),
    ) {
        let options = EngineOptions {
            vote_policy: if revote { VotePolicy::Revote } else { VotePolicy::Single },
            ..EngineOptions::default()
        };
        let mut engine = engine_with_policy(options, open_policy(100, 30));
        let voters: Vec<_> = (0..balances.len()).map(|i| addr(&format!("v{i}"))).collect();
        for (voter, balance) in voters.iter().zip(&balances) {
            engine.ledger().mint(voter, gov(), *balance);
        }
        let id = engine.create_standard_proposal(&voters[0], open_draft(0)).unwrap();

        for (idx, option, top_up) in ballots {
            let voter = &voters[idx % voters.len()];
            engine.ledger().mint(voter, gov(), top_up);
            match engine.vote(voter, id, option) {
                Ok(_) | Err(GovernanceError::AlreadyVoted { .. }) => {}
                Err(e) => prop_assert!(false, "unexpected error {e}"),
            }
        }

        let proposal = engine.proposal(id).unwrap();
        let tally = proposal.tally;
        prop_assert_eq!(
            tally.votes_for + tally.votes_against + tally.votes_abstain,
            tally.total_votes
        );
        prop_assert_eq!(tally.total_votes, proposal.recorded_weight());
        prop_assert!(proposal.votes.len() <= voters.len());
    }

    /// SUCCESS iff votes_for >= floor(supply * threshold / 10000).
    #[test]
    fn threshold_is_deterministic(
        supply in 1u64..1_000_000_000_000,
        for_share in 0u64..=10_000,
        threshold in 0u64..=10_000,
    ) {
        let mut engine = engine_with_policy(EngineOptions::default(), open_policy(10, threshold));
        let voter = addr("voter");
        let rest = addr("rest");
        let weight = (u128::from(supply) * u128::from(for_share) / 10_000) as u64;
        engine.ledger().mint(&voter, gov(), weight);
        engine.ledger().mint(&rest, gov(), supply - weight);

        let id = engine.create_standard_proposal(&voter, open_draft(0)).unwrap();
        engine.vote(&voter, id, VoteOption::For).unwrap();
        engine.clock().advance(10);

        let required = required_votes(u128::from(supply), threshold).unwrap();
        let expected = if u128::from(weight) >= required {
            ProposalResult::Success
        } else {
            ProposalResult::Fail
        };
        prop_assert_eq!(engine.execute(id).unwrap(), expected);
        prop_assert_eq!(engine.proposal(id).unwrap().result, expected);
    }

    /// Editing a policy never changes proposals created under it earlier.
    #[test]
    fn snapshot_is_immutable(
        duration in 1u64..1_000,
        threshold in 0u64..=10_000,
        new_duration in 1u64..1_000,
        new_threshold in 0u64..=10_000,
    ) {
        let mut engine = engine_with_policy(EngineOptions::default(), open_policy(duration, threshold));
        let member = addr("member");
        engine.ledger().mint(&member, gov(), 1_000);

        let in_flight = engine.create_standard_proposal(&member, open_draft(0)).unwrap();
        let before = engine.proposal(in_flight).unwrap();

        let edit = engine
            .create_policy_update_proposal(
                &member,
                open_draft(1),
                "open",
                "update",
                Some(open_policy(new_duration, new_threshold)),
            )
            .unwrap();
        engine.vote(&member, edit, VoteOption::For).unwrap();
        engine.clock().advance(duration);
        engine.execute(edit).unwrap();

        let after = engine.proposal(in_flight).unwrap();
        prop_assert_eq!(after.duration, before.duration);
        prop_assert_eq!(after.success_vote_percent, before.success_vote_percent);
        prop_assert_eq!(after.end, before.end);
    }
}
