mod support;

use sim_core::clock::{EventKind, SimulationClock};
use sim_core::error::SimError;
use support::entities::{DriverBuilder, RiderBuilder};
use support::schedule::ScheduleRunner;
use support::world::TestWorldBuilder;

#[test]
fn events_emitted_at_current_time_run_after_already_queued_ties() {
    let mut world = TestWorldBuilder::new().build();
    let mut runner = ScheduleRunner::new();
    let d1 = DriverBuilder::new("d1").request_at(&mut world, 0);
    // r1 takes d1 (pickup at t=3); both riders give up at t=0, behind the queued requests.
    let r1 = RiderBuilder::new("r1").with_patience(0).request_at(&mut world, 0);
    let r2 = RiderBuilder::new("r2").with_patience(0).request_at(&mut world, 0);

    let trace = runner.run_traced(&mut world);

    let at_zero: Vec<_> = trace.iter().filter(|(t, _)| *t == 0).map(|(_, k)| *k).collect();
    assert_eq!(
        at_zero,
        vec![
            EventKind::DriverRequest { driver: d1 },
            EventKind::RiderRequest { rider: r1 },
            EventKind::RiderRequest { rider: r2 },
            EventKind::Cancellation { rider: r1 },
            EventKind::Cancellation { rider: r2 },
        ]
    );
}

#[test]
fn clock_time_never_moves_backwards_during_a_run() {
    let mut world = TestWorldBuilder::new().build();
    let mut runner = ScheduleRunner::new();
    DriverBuilder::new("d1").request_at(&mut world, 4);
    DriverBuilder::new("d2").with_position(9, 9).request_at(&mut world, 0);
    RiderBuilder::new("r1").with_origin(2, 2).request_at(&mut world, 1);
    RiderBuilder::new("r2").with_origin(8, 1).request_at(&mut world, 2);
    RiderBuilder::new("r3").with_origin(0, 1).with_patience(3).request_at(&mut world, 2);

    let trace = runner.run_traced(&mut world);

    assert!(trace.windows(2).all(|w| w[0].0 <= w[1].0), "{trace:?}");
    assert!(world.resource::<SimulationClock>().is_empty());
}

#[test]
fn stepping_an_empty_queue_is_not_an_error() {
    let mut world = TestWorldBuilder::new().build();
    let mut runner = ScheduleRunner::new();
    assert!(!runner.run_one(&mut world));
    assert_eq!(runner.run_full(&mut world), 0);
}

#[test]
fn popping_an_empty_clock_reports_empty_queue() {
    let mut clock = SimulationClock::default();
    assert!(matches!(clock.pop_next(), Err(SimError::EmptyQueue)));
}
