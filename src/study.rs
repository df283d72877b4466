//! Study-specific capability contract.
//!
//! Every study reads its instrument files differently and partitions
//! samples into scenes and segments by its own rules. The toolkit does
//! not ship a default implementation; it consumes whatever implements
//! [`Study`].

use crate::config::Config;
use crate::participant::Participant;
use crate::record::ReadError;
use std::path::Path;

/// A time interval a partitioning step carved out of the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSpan {
    pub scene_id: String,
    /// Start timestamp, in instrument log time
    pub start: i64,
    /// End timestamp, in instrument log time
    pub end: i64,
}

/// Errors a study implementation can surface to the toolkit.
#[derive(Debug)]
pub enum StudyError {
    Io(String),
    Read(ReadError),
    /// The study's own consistency checks failed.
    Invalid(String),
}

impl std::fmt::Display for StudyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudyError::Io(e) => write!(f, "IO error: {e}"),
            StudyError::Read(e) => write!(f, "read error: {e}"),
            StudyError::Invalid(e) => write!(f, "invalid study data: {e}"),
        }
    }
}

impl std::error::Error for StudyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StudyError::Read(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReadError> for StudyError {
    fn from(e: ReadError) -> Self {
        StudyError::Read(e)
    }
}

/// What a concrete study must supply.
///
/// `read_participants` builds fully populated [`Participant`]s (scenes and
/// segments attached, validity determined, every sample and fixation bound
/// to its segment). `partition` derives the scene intervals from an
/// external or event log file. The toolkit calls these; it never provides
/// them.
pub trait Study {
    /// Read and process a study's instrument files into participants.
    fn read_participants(
        &self,
        data_dir: &Path,
        config: &Config,
    ) -> Result<Vec<Participant>, StudyError>;

    /// Derive scene intervals from an event or external log file.
    fn partition(&self, event_file: &Path, config: &Config)
        -> Result<Vec<SceneSpan>, StudyError>;
}
