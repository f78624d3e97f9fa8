//! Export of the activity log to CSV, plus consistency checks on the log.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::telemetry::{Action, ActorKind, Activity};

const HEADER: [&str; 6] = ["timestamp", "actor", "action", "id", "row", "col"];

/// Writes one CSV row per activity, in log order.
pub fn write_activities_csv<W: Write>(activities: &[Activity], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for activity in activities {
        wtr.write_record([
            activity.timestamp.to_string(),
            actor_label(activity.actor).to_string(),
            action_label(activity.action).to_string(),
            activity.id.clone(),
            activity.position.row.to_string(),
            activity.position.col.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_activities_csv<P: AsRef<Path>>(path: P, activities: &[Activity]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_activities_csv(activities, file)
}

fn actor_label(actor: ActorKind) -> &'static str {
    match actor {
        ActorKind::Rider => "rider",
        ActorKind::Driver => "driver",
    }
}

fn action_label(action: Action) -> &'static str {
    match action {
        Action::Request => "request",
        Action::Cancel => "cancel",
        Action::Pickup => "pickup",
        Action::Dropoff => "dropoff",
    }
}

/// Returns a description of every place the log breaks causal order:
/// timestamps going backwards, or a rider picked up or cancelled without a
/// prior request, or both picked up and cancelled.
pub fn validate_activity_ordering(activities: &[Activity]) -> Vec<String> {
    use std::collections::HashMap;

    let mut problems = Vec::new();
    let mut riders: HashMap<&str, (bool, bool, bool)> = HashMap::new();

    for (index, pair) in activities.windows(2).enumerate() {
        if pair[1].timestamp < pair[0].timestamp {
            problems.push(format!(
                "activity {} at t={} precedes t={}",
                index + 1,
                pair[1].timestamp,
                pair[0].timestamp
            ));
        }
    }

    for activity in activities.iter().filter(|a| a.actor == ActorKind::Rider) {
        let (requested, picked_up, cancelled) = riders.entry(activity.id.as_str()).or_default();
        match activity.action {
            Action::Request => *requested = true,
            Action::Pickup | Action::Cancel if !*requested => problems.push(format!(
                "rider {} {} before requesting",
                activity.id,
                action_label(activity.action)
            )),
            Action::Pickup => *picked_up = true,
            Action::Cancel => *cancelled = true,
            Action::Dropoff => {}
        }
        if *picked_up && *cancelled {
            problems.push(format!("rider {} both picked up and cancelled", activity.id));
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Position;

    fn activity(timestamp: u64, actor: ActorKind, action: Action, id: &str) -> Activity {
        Activity {
            timestamp,
            actor,
            action,
            id: id.to_string(),
            position: Position::new(1, -2),
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let log = vec![
            activity(0, ActorKind::Driver, Action::Request, "d1"),
            activity(4, ActorKind::Rider, Action::Cancel, "r1"),
        ];
        let mut buffer = Vec::new();
        write_activities_csv(&log, &mut buffer).expect("csv");
        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "timestamp,actor,action,id,row,col");
        assert_eq!(lines[1], "0,driver,request,d1,1,-2");
        assert_eq!(lines[2], "4,rider,cancel,r1,1,-2");
    }

    #[test]
    fn well_formed_log_has_no_problems() {
        let log = vec![
            activity(0, ActorKind::Rider, Action::Request, "r1"),
            activity(3, ActorKind::Rider, Action::Pickup, "r1"),
            activity(5, ActorKind::Rider, Action::Request, "r2"),
            activity(9, ActorKind::Rider, Action::Cancel, "r2"),
        ];
        assert!(validate_activity_ordering(&log).is_empty());
    }

    #[test]
    fn flags_backwards_time_and_impossible_rider_histories() {
        let log = vec![
            activity(5, ActorKind::Rider, Action::Request, "r1"),
            activity(2, ActorKind::Rider, Action::Pickup, "r1"),
            activity(6, ActorKind::Rider, Action::Cancel, "r1"),
            activity(7, ActorKind::Rider, Action::Pickup, "ghost"),
        ];
        let problems = validate_activity_ordering(&log);
        assert_eq!(problems.len(), 3, "{problems:?}");
    }
}
