//! Fixation records parsed from per-fixation instrument log lines.

use crate::record::cast::cast_int;
use crate::record::{split_fields, RecordError, SegmentBinding};
use serde::{Deserialize, Serialize};

/// Number of tab-separated fields on a fixation line, including the
/// trailing ignored field.
pub const FIXATION_FIELD_COUNT: usize = 6;

/// One detected eye fixation (one line of the fixation log).
///
/// The mapped fixation point is stored screen-relative: the caller-supplied
/// media offset is subtracted once at construction, not at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixation {
    pub index: Option<i64>,
    pub timestamp: Option<i64>,
    pub duration: Option<i64>,
    pub mapped_x: Option<i64>,
    pub mapped_y: Option<i64>,

    #[serde(skip)]
    segment: SegmentBinding,
}

impl Fixation {
    /// Parse one fixation line.
    ///
    /// `media_offset` is the top-left corner of the studied interface
    /// window; `(0, 0)` for full-screen stimuli. The offset is baked into
    /// the mapped coordinates permanently.
    pub fn from_line(line: &str, media_offset: (i64, i64)) -> Result<Self, RecordError> {
        let f = split_fields(line, "fixation", FIXATION_FIELD_COUNT)?;
        let (offset_x, offset_y) = media_offset;

        Ok(Self {
            index: cast_int(f[0]),
            timestamp: cast_int(f[1]),
            duration: cast_int(f[2]),
            mapped_x: cast_int(f[3]).map(|x| x - offset_x),
            mapped_y: cast_int(f[4]).map(|y| y - offset_y),
            segment: SegmentBinding::default(),
        })
    }

    /// Bind this fixation to a segment. Rebinding overwrites (last write
    /// wins); the partitioning step binds each fixation exactly once.
    pub fn set_segment(&mut self, segment_id: impl Into<String>) {
        self.segment.bind(segment_id);
    }

    /// The segment this fixation was assigned to.
    ///
    /// Fails with [`RecordError::SegmentNotBound`] when read before
    /// [`set_segment`](Self::set_segment).
    pub fn segment_id(&self) -> Result<&str, RecordError> {
        self.segment.get("fixation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "120\t331061\t216\t633\t521\t";

    #[test]
    fn test_parse_full_screen() {
        let fixation = Fixation::from_line(LINE, (0, 0)).unwrap();
        assert_eq!(fixation.index, Some(120));
        assert_eq!(fixation.timestamp, Some(331_061));
        assert_eq!(fixation.duration, Some(216));
        assert_eq!(fixation.mapped_x, Some(633));
        assert_eq!(fixation.mapped_y, Some(521));
    }

    #[test]
    fn test_media_offset_baked_in_at_construction() {
        let fixation = Fixation::from_line(LINE, (100, 50)).unwrap();
        assert_eq!(fixation.mapped_x, Some(533));
        assert_eq!(fixation.mapped_y, Some(471));
    }

    #[test]
    fn test_absent_coordinate_stays_absent() {
        let fixation = Fixation::from_line("120\t331061\t216\t\t521\t", (100, 50)).unwrap();
        assert_eq!(fixation.mapped_x, None);
        assert_eq!(fixation.mapped_y, Some(471));
    }

    #[test]
    fn test_wrong_field_count_is_fatal() {
        let err = Fixation::from_line("120\t331061\t216", (0, 0)).unwrap_err();
        assert_eq!(
            err,
            RecordError::Malformed {
                record: "fixation",
                expected: FIXATION_FIELD_COUNT,
                found: 3
            }
        );
    }

    #[test]
    fn test_segment_binding() {
        let mut fixation = Fixation::from_line(LINE, (0, 0)).unwrap();
        assert_eq!(
            fixation.segment_id(),
            Err(RecordError::SegmentNotBound { record: "fixation" })
        );

        fixation.set_segment("seg3");
        assert_eq!(fixation.segment_id(), Ok("seg3"));
    }
}
