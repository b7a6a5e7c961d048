use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pulse_ledger::{Block, BlockProcessor, PulseLedger};
use pulse_store_memory::MemoryEnvironment;
use pulse_transactions::{Call, SubmitVideoCall, Transaction, VoteVideoCall};
use pulse_types::{ChallengeId, LedgerParams, Principal, TokenAmount, VideoId};

fn principal(i: usize) -> Principal {
    Principal::new(format!("wallet_{i}")).unwrap()
}

/// A ledger with one open challenge holding `videos` submissions.
fn seeded_ledger(videos: usize) -> PulseLedger<MemoryEnvironment> {
    let mut ledger = PulseLedger::new(MemoryEnvironment::new(), LedgerParams::default());
    let c = ledger
        .create_challenge(&principal(0), "bench", TokenAmount::new(1000), 100, None)
        .unwrap();
    for i in 0..videos {
        ledger.submit_video(&principal(i % 16), "clip", c).unwrap();
    }
    ledger
}

fn bench_vote(c: &mut Criterion) {
    let mut group = c.benchmark_group("vote_video");
    for videos in [1, 100, 10_000] {
        let mut ledger = seeded_ledger(videos);
        let voter = principal(99);
        group.bench_with_input(BenchmarkId::from_parameter(videos), &videos, |b, &n| {
            let mut i = 0u64;
            b.iter(|| {
                ledger.vote_video(black_box(&voter), VideoId::new(i % n as u64)).unwrap();
                i += 1;
            });
        });
    }
    group.finish();
}

fn bench_complete(c: &mut Criterion) {
    c.bench_function("create_and_complete", |b| {
        let mut ledger = PulseLedger::new(MemoryEnvironment::new(), LedgerParams::default());
        let (creator, winner) = (principal(0), principal(1));
        b.iter(|| {
            let id = ledger
                .create_challenge(&creator, "bench", TokenAmount::new(1), 1, None)
                .unwrap();
            ledger.complete_challenge(black_box(&winner), id).unwrap();
        });
    });
}

fn bench_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_block");
    for size in [10, 100, 1000] {
        let transactions: Vec<Transaction> = (0..size)
            .map(|i| {
                let call = if i % 2 == 0 {
                    Call::SubmitVideo(SubmitVideoCall {
                        title: "clip".into(),
                        challenge_id: ChallengeId::new(0),
                    })
                } else {
                    Call::VoteVideo(VoteVideoCall {
                        video_id: VideoId::new(0),
                    })
                };
                Transaction::new(principal(i % 16), call)
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &transactions, |b, txs| {
            let mut ledger = seeded_ledger(1);
            let mut processor = BlockProcessor::new();
            let mut height = 0u64;
            b.iter(|| {
                height += 1;
                let block = Block {
                    height,
                    transactions: txs.clone(),
                };
                black_box(processor.process(&mut ledger, &block).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_vote, bench_complete, bench_block);
criterion_main!(benches);
