//! Event-description files.
//!
//! One initial event per line, whitespace separated:
//!
//! ```text
//! # timestamp DriverRequest id row,col speed
//! 0 DriverRequest Amaranth 1,1 1
//! # timestamp RiderRequest id origin destination patience
//! 10 RiderRequest Cerise 4,2 1,5 15
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. The first malformed
//! line aborts parsing; nothing is partially returned.

use std::fmt;
use std::fs;
use std::num::NonZeroU64;
use std::path::Path;

use crate::error::ScenarioError;
use crate::spatial::Position;

/// An initial event as described by the scenario, before entities exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioEvent {
    DriverRequest {
        timestamp: u64,
        id: String,
        position: Position,
        speed: NonZeroU64,
    },
    RiderRequest {
        timestamp: u64,
        id: String,
        origin: Position,
        destination: Position,
        patience: u64,
    },
}

impl ScenarioEvent {
    pub fn timestamp(&self) -> u64 {
        match self {
            ScenarioEvent::DriverRequest { timestamp, .. }
            | ScenarioEvent::RiderRequest { timestamp, .. } => *timestamp,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ScenarioEvent::DriverRequest { id, .. } | ScenarioEvent::RiderRequest { id, .. } => id,
        }
    }
}

/// Writes the event back in file syntax.
impl fmt::Display for ScenarioEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioEvent::DriverRequest {
                timestamp,
                id,
                position,
                speed,
            } => write!(
                f,
                "{timestamp} DriverRequest {id} {},{} {speed}",
                position.row, position.col
            ),
            ScenarioEvent::RiderRequest {
                timestamp,
                id,
                origin,
                destination,
                patience,
            } => write!(
                f,
                "{timestamp} RiderRequest {id} {},{} {},{} {patience}",
                origin.row, origin.col, destination.row, destination.col
            ),
        }
    }
}

/// Reads and parses a scenario file.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Vec<ScenarioEvent>, ScenarioError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scenario(&text)
}

/// Parses scenario text. Line numbers in errors are 1-based.
pub fn parse_scenario(text: &str) -> Result<Vec<ScenarioEvent>, ScenarioError> {
    let mut events = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        events.push(parse_line(index + 1, line)?);
    }
    Ok(events)
}

fn parse_line(line: usize, text: &str) -> Result<ScenarioEvent, ScenarioError> {
    let mut tokens = Tokens {
        line,
        inner: text.split_whitespace(),
    };

    let raw_timestamp = tokens.next("timestamp")?;
    let timestamp = raw_timestamp
        .parse::<u64>()
        .map_err(|_| ScenarioError::InvalidTimestamp {
            line,
            value: raw_timestamp.to_string(),
        })?;

    let event = match tokens.next("event kind")? {
        "DriverRequest" => {
            let id = tokens.next("driver id")?.to_string();
            let position = tokens.position("driver position")?;
            let raw_speed = tokens.next("speed")?;
            let speed = raw_speed
                .parse::<u64>()
                .ok()
                .and_then(NonZeroU64::new)
                .ok_or_else(|| ScenarioError::InvalidSpeed {
                    line,
                    value: raw_speed.to_string(),
                })?;
            ScenarioEvent::DriverRequest {
                timestamp,
                id,
                position,
                speed,
            }
        }
        "RiderRequest" => {
            let id = tokens.next("rider id")?.to_string();
            let origin = tokens.position("rider origin")?;
            let destination = tokens.position("rider destination")?;
            let raw_patience = tokens.next("patience")?;
            let patience =
                raw_patience
                    .parse::<u64>()
                    .map_err(|_| ScenarioError::InvalidPatience {
                        line,
                        value: raw_patience.to_string(),
                    })?;
            ScenarioEvent::RiderRequest {
                timestamp,
                id,
                origin,
                destination,
                patience,
            }
        }
        other => {
            return Err(ScenarioError::UnknownEventKind {
                line,
                value: other.to_string(),
            })
        }
    };

    if let Some(extra) = tokens.inner.next() {
        return Err(ScenarioError::TrailingTokens {
            line,
            value: extra.to_string(),
        });
    }
    Ok(event)
}

struct Tokens<'a> {
    line: usize,
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next(&mut self, field: &'static str) -> Result<&'a str, ScenarioError> {
        self.inner.next().ok_or(ScenarioError::MissingField {
            line: self.line,
            field,
        })
    }

    fn position(&mut self, field: &'static str) -> Result<Position, ScenarioError> {
        let line = self.line;
        self.next(field)?
            .parse()
            .map_err(|source| ScenarioError::InvalidPosition { line, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_event_kinds_and_skips_comments() {
        let text = "\
# drivers first
0 DriverRequest Amaranth 1,1 1

   10 RiderRequest Cerise 4,2 1,5 15
";
        let events = parse_scenario(text).expect("valid scenario");
        assert_eq!(
            events,
            vec![
                ScenarioEvent::DriverRequest {
                    timestamp: 0,
                    id: "Amaranth".into(),
                    position: Position::new(1, 1),
                    speed: NonZeroU64::new(1).expect("speed"),
                },
                ScenarioEvent::RiderRequest {
                    timestamp: 10,
                    id: "Cerise".into(),
                    origin: Position::new(4, 2),
                    destination: Position::new(1, 5),
                    patience: 15,
                },
            ]
        );
    }

    #[test]
    fn display_writes_file_syntax() {
        let line = "10 RiderRequest Cerise 4,2 1,5 15";
        let events = parse_scenario(line).expect("valid");
        assert_eq!(events[0].to_string(), line);
        assert_eq!(events[0].timestamp(), 10);
        assert_eq!(events[0].id(), "Cerise");
    }

    #[test]
    fn reports_line_numbers() {
        let err = parse_scenario("# header\n0 DriverRequest A 1,1 1\nsoon RiderRequest B 0,0 1,1 3\n")
            .expect_err("bad timestamp");
        assert!(matches!(err, ScenarioError::InvalidTimestamp { line: 3, .. }));
    }

    #[test]
    fn rejects_malformed_lines() {
        let cases = [
            ("0 Teleport A 1,1 1", "unknown event kind"),
            ("0 DriverRequest A 1;1 1", "invalid position"),
            ("0 DriverRequest A 1,1 0", "speed"),
            ("0 DriverRequest A 1,1", "missing speed"),
            ("0 RiderRequest B 0,0 1,1 -4", "patience"),
            ("0 RiderRequest B 0,0 1,1 4 extra", "trailing"),
            ("-1 DriverRequest A 1,1 1", "invalid timestamp"),
        ];
        for (line, expected) in cases {
            let err = parse_scenario(line).expect_err(line);
            assert!(
                err.to_string().contains(expected),
                "'{line}' produced '{err}', expected '{expected}'"
            );
        }
    }
}
