//! Ride dispatch simulator CLI
//!
//! Run an event-description file, or generate a random one.
//!
//! # Example
//!
//! ```bash
//! # Generate a seeded city and run it
//! ride-sim generate --drivers 5 --riders 40 --seed 7 > events.txt
//! ride-sim run events.txt
//!
//! # Machine-readable report plus the activity log
//! ride-sim run events.txt --json --activity-csv activities.csv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sim_core::scenario::{generate_scenario, load_scenario, ScenarioParams, SimConfig};
use sim_core::speed::RoundingPolicy;
use sim_core::telemetry_export::export_activities_csv;
use sim_core::Simulation;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ride-sim")]
#[command(version, about = "Discrete-event ride dispatch simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario file and print the report
    Run {
        /// Event-description file
        events: PathBuf,

        /// How fractional travel times are rounded
        #[arg(long, default_value = "half-even")]
        rounding: RoundingPolicy,

        /// Abort if the run executes more events than this
        #[arg(long, env = "RIDE_SIM_MAX_STEPS")]
        max_steps: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the activity log to this CSV file
        #[arg(long)]
        activity_csv: Option<PathBuf>,

        /// Print every executed event
        #[arg(long)]
        trace: bool,
    },
    /// Print a random scenario in event-file syntax
    Generate {
        #[arg(long, default_value_t = 10)]
        drivers: usize,

        #[arg(long, default_value_t = 50)]
        riders: usize,

        /// Random seed; omit for a different scenario every time
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 20)]
        rows: i64,

        #[arg(long, default_value_t = 20)]
        cols: i64,

        /// Rider requests are spread over [0, window]
        #[arg(long, default_value_t = 100)]
        window: u64,

        /// Driver requests are spread over [0, driver-spread]
        #[arg(long, default_value_t = 10)]
        driver_spread: u64,

        #[arg(long, default_value_t = 1)]
        min_speed: u64,

        #[arg(long, default_value_t = 3)]
        max_speed: u64,

        #[arg(long, default_value_t = 5)]
        min_patience: u64,

        #[arg(long, default_value_t = 30)]
        max_patience: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,sim_core=info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Run {
            events,
            rounding,
            max_steps,
            json,
            activity_csv,
            trace,
        } => {
            let mut config = SimConfig::default().with_rounding(rounding);
            if let Some(max_steps) = max_steps {
                config = config.with_max_steps(max_steps);
            }
            run(events, config, json, activity_csv, trace)
        }
        Commands::Generate {
            drivers,
            riders,
            seed,
            rows,
            cols,
            window,
            driver_spread,
            min_speed,
            max_speed,
            min_patience,
            max_patience,
        } => {
            let mut params = ScenarioParams::default()
                .with_counts(drivers, riders)
                .with_grid(rows, cols)
                .with_request_window(window)
                .with_driver_spread(driver_spread)
                .with_speed_range(min_speed, max_speed)
                .with_patience_range(min_patience, max_patience);
            if let Some(seed) = seed {
                params = params.with_seed(seed);
            }
            for event in generate_scenario(&params) {
                println!("{event}");
            }
            Ok(())
        }
    }
}

fn run(
    path: PathBuf,
    config: SimConfig,
    json: bool,
    activity_csv: Option<PathBuf>,
    trace: bool,
) -> Result<()> {
    let events = load_scenario(&path)?;
    info!(path = %path.display(), events = events.len(), rounding = %config.rounding, "scenario loaded");

    let mut sim = Simulation::new(config);
    let report = sim
        .run_with_hook(&events, |world, event| {
            if trace {
                println!("{}", event.describe(world));
            }
        })
        .with_context(|| format!("simulation of {} failed", path.display()))?;

    if let Some(csv_path) = activity_csv {
        export_activities_csv(&csv_path, sim.monitor().activities())
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        info!(path = %csv_path.display(), "activity log written");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
