//! Generate a random city, run it and print the report.
//!
//! Run with: cargo run -p sim_core --example scenario_run

use sim_core::scenario::{generate_scenario, ScenarioParams, SimConfig};
use sim_core::Simulation;

fn main() {
    const NUM_RIDERS: usize = 500;
    const NUM_DRIVERS: usize = 40;
    const SEED: u64 = 123;

    let params = ScenarioParams::default()
        .with_seed(SEED)
        .with_counts(NUM_DRIVERS, NUM_RIDERS)
        .with_grid(30, 30)
        .with_request_window(1_000)
        .with_patience_range(10, 60);
    let events = generate_scenario(&params);

    let mut sim = Simulation::new(SimConfig::default());
    let mut steps = 0usize;
    let report = match sim.run_with_hook(&events, |_, _| steps += 1) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("simulation failed: {err}");
            std::process::exit(1);
        }
    };

    println!(
        "--- Scenario run ({} riders, {} drivers, seed {}) ---",
        NUM_RIDERS, NUM_DRIVERS, SEED
    );
    println!("Steps executed: {steps}");
    println!("Activities logged: {}", sim.monitor().activities().len());
    println!();
    print!("{report}");
}
