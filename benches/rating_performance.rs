//! Performance benchmarks for rating calculations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tiered_elo::{expected_score, Match, NewPlayer, PlayerId, RatingEngine};

fn create_bench_engine(players: usize) -> (RatingEngine, Vec<PlayerId>) {
    let mut engine = RatingEngine::default();
    let ids = (0..players)
        .map(|i| {
            engine.create_player(
                NewPlayer::new()
                    .rating(1000.0 + (i as f64 * 37.0) % 1600.0)
                    .games_played((i % 60) as u32),
            )
        })
        .collect();
    (engine, ids)
}

fn round_robin(ids: &[PlayerId]) -> Vec<Match> {
    let mut matches = Vec::new();
    for (i, a) in ids.iter().enumerate() {
        for (j, b) in ids.iter().enumerate().skip(i + 1) {
            let result = match (i + j) % 3 {
                0 => 1.0,
                1 => 0.5,
                _ => 0.0,
            };
            matches.push(Match::new(*a, *b, result));
        }
    }
    matches
}

fn bench_expected_score(c: &mut Criterion) {
    c.bench_function("expected_score", |b| {
        b.iter(|| expected_score(black_box(1450.0), black_box(1720.0)))
    });
}

fn bench_round_robin_update(c: &mut Criterion) {
    let (engine, ids) = create_bench_engine(64);
    let matches = round_robin(&ids);

    c.bench_function("update_ratings_round_robin_64_players", |b| {
        b.iter(|| {
            let mut engine = engine.clone();
            engine.update_ratings(black_box(&matches));
            black_box(engine)
        })
    });
}

criterion_group!(benches, bench_expected_score, bench_round_robin_update);
criterion_main!(benches);
