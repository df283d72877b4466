//! Participant aggregate root and the scene/segment collaborator contract.
//!
//! A [`Participant`] owns an ordered tree of scenes and, at a finer grain,
//! segments. Both expose the same capability - a validity flag and a
//! feature export - captured by the [`FeatureSource`] trait. The concrete
//! scene/segment types belong to study-specific code; this module only
//! reads from them.

use serde::{Deserialize, Serialize};

/// One exported feature cell.
///
/// `Missing` marks a column a scene did not report (it renders as an empty
/// cell); it is distinct from a legitimate zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Float(v) => write!(f, "{v}"),
            FeatureValue::Text(v) => write!(f, "{v}"),
            FeatureValue::Missing => Ok(()),
        }
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Int(v)
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Float(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Text(v)
    }
}

/// Which features a scene or segment is asked to compute.
///
/// `aoi_features` selects feature kinds computed for every AOI, while
/// `aoi_feature_labels` names exact composite `<aoi>_<feature>` columns
/// (e.g. `graph_fixationrate`). Both are alternative views over the same
/// per-AOI computation and are passed through to the collaborator
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureQuery {
    /// Restricts which non-AOI features are computed, `None` = all
    pub features: Option<Vec<String>>,
    /// Feature kinds to compute per AOI
    pub aoi_features: Option<Vec<String>>,
    /// Exact `<aoi>_<feature>` column names to include
    pub aoi_feature_labels: Option<Vec<String>>,
}

/// Capability contract for scenes and segments.
///
/// Implementations compute named numeric summaries over the records bound
/// to them; `features` must return names and values in matching order.
pub trait FeatureSource {
    /// Identifier of this scene or segment.
    fn id(&self) -> &str;

    /// Whether the underlying gaze data passed the study's quality checks.
    fn is_valid(&self) -> bool;

    /// Ordered feature names and their values for the given query.
    fn features(&self, query: &FeatureQuery) -> (Vec<String>, Vec<FeatureValue>);
}

/// One study participant.
///
/// Constructed once by study-specific code with its scenes and segments
/// already populated and its overall validity already determined; the
/// toolkit only reads from it afterwards.
pub struct Participant {
    id: String,
    valid: bool,
    scenes: Vec<Box<dyn FeatureSource>>,
    segments: Vec<Box<dyn FeatureSource>>,
}

impl Participant {
    /// Create a participant with no children yet.
    pub fn new(id: impl Into<String>, valid: bool) -> Self {
        Self {
            id: id.into(),
            valid,
            scenes: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Create a participant with its scene and segment trees populated.
    pub fn with_children(
        id: impl Into<String>,
        valid: bool,
        scenes: Vec<Box<dyn FeatureSource>>,
        segments: Vec<Box<dyn FeatureSource>>,
    ) -> Self {
        Self {
            id: id.into(),
            valid,
            scenes,
            segments,
        }
    }

    pub fn add_scene(&mut self, scene: Box<dyn FeatureSource>) {
        self.scenes.push(scene);
    }

    pub fn add_segment(&mut self, segment: Box<dyn FeatureSource>) {
        self.segments.push(segment);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether this participant's gaze data as a whole is usable.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Scenes in their stored (analysis) order.
    pub fn scenes(&self) -> &[Box<dyn FeatureSource>] {
        &self.scenes
    }

    /// Segments in their stored (analysis) order.
    pub fn segments(&self) -> &[Box<dyn FeatureSource>] {
        &self.segments
    }

    /// Ids of segments that passed the quality checks.
    pub fn valid_segment_ids(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| s.is_valid())
            .map(|s| s.id())
            .collect()
    }

    /// Ids of segments that failed the quality checks.
    pub fn invalid_segment_ids(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| !s.is_valid())
            .map(|s| s.id())
            .collect()
    }
}

impl std::fmt::Debug for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("id", &self.id)
            .field("valid", &self.valid)
            .field("scenes", &self.scenes.len())
            .field("segments", &self.segments.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSegment {
        id: String,
        valid: bool,
    }

    impl FeatureSource for StubSegment {
        fn id(&self) -> &str {
            &self.id
        }

        fn is_valid(&self) -> bool {
            self.valid
        }

        fn features(&self, _query: &FeatureQuery) -> (Vec<String>, Vec<FeatureValue>) {
            (vec!["length".to_string()], vec![FeatureValue::Int(100)])
        }
    }

    fn segment(id: &str, valid: bool) -> Box<dyn FeatureSource> {
        Box::new(StubSegment {
            id: id.to_string(),
            valid,
        })
    }

    #[test]
    fn test_segment_ids_by_validity() {
        let mut participant = Participant::new("P01", true);
        participant.add_segment(segment("seg1", true));
        participant.add_segment(segment("seg2", false));
        participant.add_segment(segment("seg3", true));

        assert_eq!(participant.valid_segment_ids(), vec!["seg1", "seg3"]);
        assert_eq!(participant.invalid_segment_ids(), vec!["seg2"]);
    }

    #[test]
    fn test_feature_value_display() {
        assert_eq!(FeatureValue::Int(42).to_string(), "42");
        assert_eq!(FeatureValue::Float(1.5).to_string(), "1.5");
        assert_eq!(FeatureValue::Text("seg1".into()).to_string(), "seg1");
        assert_eq!(FeatureValue::Missing.to_string(), "");
    }
}
