//! Readers that turn whole instrument log files into record vectors.
//!
//! Instrument exports start with a fixed number of header lines; the skip
//! counts come from [`Config`], never from embedded literals. A malformed
//! data line is fatal and reported with its 1-based line number.

use crate::config::Config;
use crate::record::event::Event;
use crate::record::fixation::Fixation;
use crate::record::sample::SamplePoint;
use crate::record::RecordError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Errors raised while reading a log file.
#[derive(Debug)]
pub enum ReadError {
    Io(std::io::Error),
    /// A data line failed to parse; `line` is 1-based within the file.
    Record { line: usize, source: RecordError },
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "IO error: {e}"),
            ReadError::Record { line, source } => write!(f, "line {line}: {source}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            ReadError::Record { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        ReadError::Io(e)
    }
}

/// Read all events from an event log file.
///
/// Skips `event_header_lines + extra_header_lines` header lines, then
/// parses each non-empty line into an [`Event`].
pub fn read_events(path: impl AsRef<Path>, config: &Config) -> Result<Vec<Event>, ReadError> {
    let skip = config.event_header_lines + config.extra_header_lines;
    read_records(path, skip, Event::from_line)
}

/// Read all gaze samples from a sample log file.
pub fn read_samples(
    path: impl AsRef<Path>,
    config: &Config,
) -> Result<Vec<SamplePoint>, ReadError> {
    read_records(path, config.sample_header_lines, SamplePoint::from_line)
}

/// Read all fixations from a fixation log file, baking `media_offset` into
/// the mapped coordinates.
pub fn read_fixations(
    path: impl AsRef<Path>,
    media_offset: (i64, i64),
    config: &Config,
) -> Result<Vec<Fixation>, ReadError> {
    read_records(path, config.fixation_header_lines, |line| {
        Fixation::from_line(line, media_offset)
    })
}

fn read_records<T>(
    path: impl AsRef<Path>,
    skip_lines: usize,
    parse: impl Fn(&str) -> Result<T, RecordError>,
) -> Result<Vec<T>, ReadError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if index < skip_lines || line.trim().is_empty() {
            continue;
        }
        let record = parse(&line).map_err(|source| ReadError::Record {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("gazekit-reader-{name}"));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn test_config() -> Config {
        Config {
            sample_header_lines: 1,
            fixation_header_lines: 1,
            event_header_lines: 1,
            extra_header_lines: 1,
            ..Config::default()
        }
    }

    #[test]
    fn test_read_events_skips_configured_headers() {
        let contents = "Export Info\tvalue\t\t\t\t\t\n\
                        Timestamp\tEvent\tEventKey\tData1\tData2\tDescriptor\t\n\
                        1000\tKeyPress\t3\tq\t\t\t\n\
                        2000\tLMouseButton\t4\t640\t480\t\t\n";
        let path = write_temp("events.tsv", contents);

        let events = read_events(&path, &test_config()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp, Some(1000));
        assert_eq!(events[1].event, "LMouseButton");
    }

    #[test]
    fn test_read_fixations_with_offset() {
        let contents = "FixationIndex\tTimestamp\tDuration\tX\tY\t\n\
                        1\t1000\t200\t640\t480\t\n";
        let path = write_temp("fixations.tsv", contents);

        let fixations = read_fixations(&path, (40, 80), &test_config()).unwrap();
        assert_eq!(fixations.len(), 1);
        assert_eq!(fixations[0].mapped_x, Some(600));
        assert_eq!(fixations[0].mapped_y, Some(400));
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let contents = "Timestamp\tEvent\tEventKey\tData1\tData2\tDescriptor\t\n\
                        not-enough-fields\n";
        let path = write_temp("bad-events.tsv", contents);
        let config = Config {
            event_header_lines: 1,
            extra_header_lines: 0,
            ..Config::default()
        };

        match read_events(&path, &config) {
            Err(ReadError::Record { line, source }) => {
                assert_eq!(line, 2);
                assert!(matches!(source, RecordError::Malformed { .. }));
            }
            other => panic!("expected a record error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_events("/nonexistent/gazekit-events.tsv", &Config::default());
        assert!(matches!(result, Err(ReadError::Io(_))));
    }
}
