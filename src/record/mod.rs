//! Typed records parsed from delimited instrument log lines.
//!
//! Each record type maps exactly one tab-separated line to one strongly
//! typed value: [`SamplePoint`] for gaze samples, [`Fixation`] for detected
//! fixations, and [`Event`] for experiment-control events. Numeric fields
//! use null-safe casting (absent, not zero, on conversion failure); string
//! fields are kept verbatim.

pub mod cast;
pub mod event;
pub mod fixation;
pub mod reader;
pub mod sample;

pub use cast::{cast_float, cast_int};
pub use event::{Event, EVENT_FIELD_COUNT};
pub use fixation::{Fixation, FIXATION_FIELD_COUNT};
pub use reader::{read_events, read_fixations, read_samples, ReadError};
pub use sample::{SamplePoint, SAMPLE_FIELD_COUNT, WORST_VALIDITY_CODE};

/// Errors raised while constructing or interrogating a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The line did not split into the expected number of fields.
    Malformed {
        record: &'static str,
        expected: usize,
        found: usize,
    },
    /// A segment id was read before one was bound to the record.
    SegmentNotBound { record: &'static str },
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::Malformed {
                record,
                expected,
                found,
            } => write!(
                f,
                "malformed {record} line: expected {expected} fields, found {found}"
            ),
            RecordError::SegmentNotBound { record } => {
                write!(f, "segment id of a {record} was read before it was bound")
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// Segment binding lifecycle for sample and fixation records.
///
/// A record starts `Unbound`; the partitioning step binds it to exactly one
/// segment before features are computed. Reading an unbound id is a
/// contract violation and fails loudly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum SegmentBinding {
    #[default]
    Unbound,
    Bound(String),
}

impl SegmentBinding {
    /// Bind a segment id. Rebinding overwrites the previous value
    /// (last write wins); callers bind at most once in practice.
    pub(crate) fn bind(&mut self, segment_id: impl Into<String>) {
        *self = SegmentBinding::Bound(segment_id.into());
    }

    pub(crate) fn get(&self, record: &'static str) -> Result<&str, RecordError> {
        match self {
            SegmentBinding::Bound(id) => Ok(id),
            SegmentBinding::Unbound => Err(RecordError::SegmentNotBound { record }),
        }
    }
}

/// Split a log line into exactly `expected` tab-separated fields.
///
/// Trailing line terminators are stripped before splitting. Any other
/// field count is a fatal parse error for that line.
pub(crate) fn split_fields<'a>(
    line: &'a str,
    record: &'static str,
    expected: usize,
) -> Result<Vec<&'a str>, RecordError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != expected {
        return Err(RecordError::Malformed {
            record,
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_exact_count() {
        let fields = split_fields("a\tb\tc", "test", 3).unwrap();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_fields_strips_line_ending() {
        let fields = split_fields("a\tb\tc\r\n", "test", 3).unwrap();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_fields_count_mismatch() {
        let err = split_fields("a\tb", "test", 3).unwrap_err();
        assert_eq!(
            err,
            RecordError::Malformed {
                record: "test",
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_binding_lifecycle() {
        let mut binding = SegmentBinding::default();
        assert_eq!(
            binding.get("sample"),
            Err(RecordError::SegmentNotBound { record: "sample" })
        );

        binding.bind("seg1");
        assert_eq!(binding.get("sample"), Ok("seg1"));

        // Rebinding is last-write-wins.
        binding.bind("seg2");
        assert_eq!(binding.get("sample"), Ok("seg2"));
    }
}
