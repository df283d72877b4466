//! Experiment-control event records parsed from the event log.

use crate::record::cast::cast_int;
use crate::record::{split_fields, RecordError};
use serde::{Deserialize, Serialize};

/// Number of tab-separated fields on an event line, including the trailing
/// ignored field.
pub const EVENT_FIELD_COUNT: usize = 7;

/// One logged experiment-control occurrence (stimulus change, key press,
/// mouse click, ...).
///
/// Events are standalone log entries: they carry no segment binding and
/// are never inserted into the segment tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: Option<i64>,
    pub event: String,
    pub event_key: Option<i64>,
    pub data1: String,
    pub data2: String,
    pub descriptor: String,
}

impl Event {
    /// Parse one event line.
    pub fn from_line(line: &str) -> Result<Self, RecordError> {
        let f = split_fields(line, "event", EVENT_FIELD_COUNT)?;

        Ok(Self {
            timestamp: cast_int(f[0]),
            event: f[1].to_string(),
            event_key: cast_int(f[2]),
            data1: f[3].to_string(),
            data2: f[4].to_string(),
            descriptor: f[5].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_line() {
        let event = Event::from_line("331061\tKeyPress\t3\tq\t\tScreenStart\t").unwrap();
        assert_eq!(event.timestamp, Some(331_061));
        assert_eq!(event.event, "KeyPress");
        assert_eq!(event.event_key, Some(3));
        assert_eq!(event.data1, "q");
        assert_eq!(event.data2, "");
        assert_eq!(event.descriptor, "ScreenStart");
    }

    #[test]
    fn test_non_numeric_key_degrades_to_absent() {
        let event = Event::from_line("331061\tLMouseButton\tLeft\t640\t480\t\t").unwrap();
        assert_eq!(event.event_key, None);
        assert_eq!(event.data1, "640");
    }

    #[test]
    fn test_wrong_field_count_is_fatal() {
        let err = Event::from_line("331061\tKeyPress").unwrap_err();
        assert_eq!(
            err,
            RecordError::Malformed {
                record: "event",
                expected: EVENT_FIELD_COUNT,
                found: 2
            }
        );
    }
}
