//! Benchmark suite for eye-guardian-rl
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eye_guardian_rl::{Action, Agent, AgentConfig, MemoryStore, State, ValueTable};

fn bench_tick(c: &mut Criterion) {
    let mut agent = Agent::new(AgentConfig::default().with_seed(42), MemoryStore::new());
    let samples = [(8.0, 40.0), (15.0, 55.0), (10.0, 60.0), (20.0, 90.0)];
    let mut i = 0usize;

    c.bench_function("agent_tick", |b| {
        b.iter(|| {
            let (rate, distance) = samples[i % samples.len()];
            i += 1;
            black_box(agent.tick(rate, distance, |_| {}))
        })
    });
}

fn bench_q_update(c: &mut Criterion) {
    let mut table = ValueTable::new();

    c.bench_function("value_table_update", |b| {
        b.iter(|| {
            black_box(table.update(
                State::LowBlinkBadDistance,
                Action::BlinkReminder,
                1.0,
                State::GoodBlinkGoodDistance,
                0.1,
                0.9,
            ))
        })
    });
}

fn bench_table_json(c: &mut Criterion) {
    let table = ValueTable::new();
    let blob = table.to_json().unwrap();

    c.bench_function("value_table_to_json", |b| b.iter(|| black_box(table.to_json())));
    c.bench_function("value_table_from_json", |b| {
        b.iter(|| black_box(ValueTable::from_json(&blob)))
    });
}

criterion_group!(benches, bench_tick, bench_q_update, bench_table_json);
criterion_main!(benches);
