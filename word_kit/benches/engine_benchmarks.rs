use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use word_kit::{GameEngine, progress::MemoryStore};

/// Helper to create an engine with a round in play on `level`
fn setup_round(level: usize) -> GameEngine {
    let mut engine = GameEngine::with_store(Box::new(MemoryStore::new())).unwrap();
    engine.start_level(level);
    engine
}

/// Benchmark a single correct guess
fn bench_guess_hit(c: &mut Criterion) {
    c.bench_function("guess_hit", |b| {
        b.iter_batched(
            || setup_round(11), // ELEPHANT
            |mut engine| {
                engine.guess_letter('E').unwrap();
                engine
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark a single wrong guess
fn bench_guess_miss(c: &mut Criterion) {
    c.bench_function("guess_miss", |b| {
        b.iter_batched(
            || setup_round(11),
            |mut engine| {
                engine.guess_letter('Z').unwrap();
                engine
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark a full winning round including the progress write
fn bench_solve_round(c: &mut Criterion) {
    c.bench_function("solve_round", |b| {
        b.iter_batched(
            || setup_round(11),
            |mut engine| {
                for letter in "ELPHANT".chars() {
                    engine.guess_letter(letter).unwrap();
                }
                engine
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark snapshot building at different stages of a round
fn bench_view_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_generation");

    for guessed in [0usize, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_guessed", guessed)),
            guessed,
            |b, &n| {
                let mut engine = setup_round(11);
                for letter in "ELPHANTS".chars().take(n) {
                    engine.guess_letter(letter).unwrap();
                }
                b.iter(|| engine.view());
            },
        );
    }

    group.finish();
}

/// Benchmark level selection listing
fn bench_level_statuses(c: &mut Criterion) {
    let engine = setup_round(0);
    c.bench_function("level_statuses", |b| {
        b.iter(|| engine.level_statuses());
    });
}

criterion_group!(
    round_operations,
    bench_guess_hit,
    bench_guess_miss,
    bench_solve_round,
);

criterion_group!(snapshots, bench_view_generation, bench_level_statuses);

criterion_main!(round_operations, snapshots);
