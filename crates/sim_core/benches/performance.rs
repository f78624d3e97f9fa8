//! Performance benchmarks for sim_core using Criterion.rs.

use bevy_ecs::prelude::Entity;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sim_core::dispatcher::Dispatcher;
use sim_core::scenario::{generate_scenario, ScenarioParams, SimConfig};
use sim_core::run_scenario;

fn bench_simulation_run(c: &mut Criterion) {
    let scenarios = vec![
        ("small", 10, 100),
        ("medium", 50, 1_000),
        ("large", 200, 5_000),
    ];

    let mut group = c.benchmark_group("simulation_run");
    for (name, drivers, riders) in scenarios {
        let params = ScenarioParams::default()
            .with_seed(42)
            .with_counts(drivers, riders)
            .with_grid(100, 100)
            .with_request_window(riders as u64 * 2);
        let events = generate_scenario(&params);
        group.bench_with_input(BenchmarkId::from_parameter(name), &events, |b, events| {
            b.iter(|| black_box(run_scenario(events, SimConfig::default()).expect("run")));
        });
    }
    group.finish();
}

fn bench_dispatcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatcher");
    for drivers in [10u32, 100, 1_000] {
        let mut dispatcher = Dispatcher::new();
        for i in 0..drivers {
            dispatcher.request_rider(Entity::from_raw(i));
        }
        let rider = Entity::from_raw(drivers + 1);
        group.bench_with_input(BenchmarkId::new("request_driver", drivers), &drivers, |b, _| {
            b.iter(|| {
                black_box(
                    dispatcher.request_driver(rider, |driver| Some(u64::from(driver.index() % 97))),
                )
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_simulation_run, bench_dispatcher);
criterion_main!(benches);
