//! Gaze sample records parsed from per-sample instrument log lines.

use crate::record::cast::{cast_float, cast_int};
use crate::record::{split_fields, RecordError, SegmentBinding};
use serde::{Deserialize, Serialize};

/// Number of tab-separated fields on a gaze sample line, including the
/// trailing ignored field.
pub const SAMPLE_FIELD_COUNT: usize = 42;

/// Worst per-eye validity code reported by the instrument. Lower codes
/// mean higher confidence that the eye was identified correctly.
pub const WORST_VALIDITY_CODE: i64 = 2;

/// One instrument-logged gaze measurement (one line of the sample log).
///
/// Numeric fields are `None` when the instrument logged no measurement
/// for that column; string fields are kept exactly as logged. The AOI id
/// and name columns are comma-joined lists that are never split at this
/// layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplePoint {
    // Identifiers and timestamps
    pub timestamp: Option<i64>,
    pub datetime_stamp: String,
    pub datetime_stamp_start_offset: String,
    pub number: Option<i64>,

    // Continuous measurements, left eye
    pub gaze_point_x_left: Option<f64>,
    pub gaze_point_y_left: Option<f64>,
    pub cam_x_left: Option<f64>,
    pub cam_y_left: Option<f64>,
    pub distance_left: Option<f64>,
    pub pupil_left: Option<f64>,
    pub validity_left: Option<i64>,

    // Continuous measurements, right eye
    pub gaze_point_x_right: Option<f64>,
    pub gaze_point_y_right: Option<f64>,
    pub cam_x_right: Option<f64>,
    pub cam_y_right: Option<f64>,
    pub distance_right: Option<f64>,
    pub pupil_right: Option<f64>,
    pub validity_right: Option<i64>,

    // Fixation mapping and combined gaze point
    pub fixation_index: Option<i64>,
    pub gaze_point_x: Option<i64>,
    pub gaze_point_y: Option<i64>,

    // Event metadata logged alongside the sample
    pub event: String,
    pub event_key: String,
    pub data1: String,
    pub data2: String,
    pub descriptor: String,

    // Stimulus and media geometry
    pub stimuli_name: String,
    pub stimuli_id: Option<i64>,
    pub media_width: Option<i64>,
    pub media_height: Option<i64>,
    pub media_pos_x: Option<i64>,
    pub media_pos_y: Option<i64>,

    pub mapped_fixation_point_x: Option<i64>,
    pub mapped_fixation_point_y: Option<i64>,
    pub fixation_duration: Option<i64>,

    // AOI membership, comma-joined identifier lists kept as raw text
    pub aoi_ids: String,
    pub aoi_names: String,

    pub mapped_gaze_point_x: Option<i64>,
    pub mapped_gaze_point_y: Option<i64>,
    pub microsecond_timestamp: Option<i64>,
    pub absolute_microsecond_timestamp: Option<i64>,

    #[serde(skip)]
    segment: SegmentBinding,
}

impl SamplePoint {
    /// Parse one gaze sample line.
    ///
    /// The line must split into exactly [`SAMPLE_FIELD_COUNT`] tab-separated
    /// fields; any other count fails with [`RecordError::Malformed`]. A
    /// numeric field that does not parse becomes `None` without affecting
    /// any other field.
    pub fn from_line(line: &str) -> Result<Self, RecordError> {
        let f = split_fields(line, "sample", SAMPLE_FIELD_COUNT)?;
        // f[41] is a trailing field the instrument leaves unused.

        Ok(Self {
            timestamp: cast_int(f[0]),
            datetime_stamp: f[1].to_string(),
            datetime_stamp_start_offset: f[2].to_string(),
            number: cast_int(f[3]),
            gaze_point_x_left: cast_float(f[4]),
            gaze_point_y_left: cast_float(f[5]),
            cam_x_left: cast_float(f[6]),
            cam_y_left: cast_float(f[7]),
            distance_left: cast_float(f[8]),
            pupil_left: cast_float(f[9]),
            validity_left: cast_int(f[10]),
            gaze_point_x_right: cast_float(f[11]),
            gaze_point_y_right: cast_float(f[12]),
            cam_x_right: cast_float(f[13]),
            cam_y_right: cast_float(f[14]),
            distance_right: cast_float(f[15]),
            pupil_right: cast_float(f[16]),
            validity_right: cast_int(f[17]),
            fixation_index: cast_int(f[18]),
            gaze_point_x: cast_int(f[19]),
            gaze_point_y: cast_int(f[20]),
            event: f[21].to_string(),
            event_key: f[22].to_string(),
            data1: f[23].to_string(),
            data2: f[24].to_string(),
            descriptor: f[25].to_string(),
            stimuli_name: f[26].to_string(),
            stimuli_id: cast_int(f[27]),
            media_width: cast_int(f[28]),
            media_height: cast_int(f[29]),
            media_pos_x: cast_int(f[30]),
            media_pos_y: cast_int(f[31]),
            mapped_fixation_point_x: cast_int(f[32]),
            mapped_fixation_point_y: cast_int(f[33]),
            fixation_duration: cast_int(f[34]),
            aoi_ids: f[35].to_string(),
            aoi_names: f[36].to_string(),
            mapped_gaze_point_x: cast_int(f[37]),
            mapped_gaze_point_y: cast_int(f[38]),
            microsecond_timestamp: cast_int(f[39]),
            absolute_microsecond_timestamp: cast_int(f[40]),
            segment: SegmentBinding::default(),
        })
    }

    /// Whether at least one eye was tracked with acceptable quality.
    ///
    /// Computed on demand from the current validity codes, never cached:
    /// false iff both codes equal [`WORST_VALIDITY_CODE`]. An absent code
    /// does not count as worst.
    pub fn is_valid(&self) -> bool {
        let worst = |code: Option<i64>| code.is_some_and(|c| c >= WORST_VALIDITY_CODE);
        !(worst(self.validity_left) && worst(self.validity_right))
    }

    /// Bind this sample to a segment. Rebinding overwrites (last write
    /// wins); the partitioning step binds each sample exactly once.
    pub fn set_segment(&mut self, segment_id: impl Into<String>) {
        self.segment.bind(segment_id);
    }

    /// The segment this sample was assigned to.
    ///
    /// Fails with [`RecordError::SegmentNotBound`] when read before
    /// [`set_segment`](Self::set_segment) - never a silent default.
    pub fn segment_id(&self) -> Result<&str, RecordError> {
        self.segment.get("sample")
    }
}
