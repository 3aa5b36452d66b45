use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use quorum_governance::{
    required_votes, Charter, EngineOptions, GovernanceEngine, PolicyParams, ProposalDraft,
};
use quorum_nullables::{NullClock, NullEventSink, NullGovernanceStore, NullLedger};
use quorum_types::{AccountAddress, AssetId, ProposalId, VoteOption};

type BenchEngine = GovernanceEngine<NullGovernanceStore, NullLedger, NullClock, NullEventSink>;

const DURATION: u64 = 1_000;

/// An engine with one open proposal that already carries `voters` votes.
fn engine_with_votes(voters: usize) -> (BenchEngine, ProposalId) {
    let mut engine = GovernanceEngine::new(
        NullGovernanceStore::new(),
        NullLedger::new(),
        NullClock::new(0),
        NullEventSink::new(),
        EngineOptions::default(),
    );
    let token = AssetId::new("GOV");
    let charter = Charter {
        name: "bench".to_string(),
        description: String::new(),
        image_url: String::new(),
        governance_token: token.clone(),
    };
    let params = PolicyParams {
        duration: DURATION,
        success_vote_percent: 5_000,
        min_amount_to_vote: 1,
        min_amount_to_create_proposal: 1,
    };
    engine
        .initialize(
            &AccountAddress::new("creator"),
            charter,
            AccountAddress::new("treasury"),
            "standard",
            params,
        )
        .unwrap();

    let proposer = AccountAddress::new("proposer");
    engine.ledger().mint(&proposer, token.clone(), 1_000);
    let id = engine
        .create_standard_proposal(&proposer, ProposalDraft::new("bench", "", "standard"))
        .unwrap();

    for i in 0..voters {
        let voter = AccountAddress::new(format!("voter{i}"));
        engine.ledger().mint(&voter, token.clone(), 1_000);
        engine.vote(&voter, id, VoteOption::For).unwrap();
    }
    (engine, id)
}

fn bench_vote(c: &mut Criterion) {
    let mut group = c.benchmark_group("vote");

    for existing in [0, 10, 100, 1000] {
        let (mut engine, id) = engine_with_votes(existing);
        let token = AssetId::new("GOV");
        let mut n = 0u64;

        group.bench_with_input(BenchmarkId::new("cast", existing), &existing, |b, _| {
            b.iter(|| {
                let voter = AccountAddress::new(format!("late{n}"));
                n += 1;
                engine.ledger().mint(&voter, token.clone(), 1_000);
                black_box(engine.vote(&voter, id, VoteOption::Against).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");

    for voters in [1, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("standard", voters), &voters, |b, &voters| {
            b.iter_batched(
                || {
                    let (engine, id) = engine_with_votes(voters);
                    engine.clock().advance(DURATION);
                    (engine, id)
                },
                |(mut engine, id)| black_box(engine.execute(id).unwrap()),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_required_votes(c: &mut Criterion) {
    c.bench_function("required_votes", |b| {
        b.iter(|| required_votes(black_box(1_000_000_000_000_000), black_box(30)))
    });
}

criterion_group!(benches, bench_vote, bench_execute, bench_required_votes);
criterion_main!(benches);
