//! Gazekit - eye-tracking instrument log parsing and feature export.
//!
//! This library turns raw eye-tracker exports (per-sample gaze logs,
//! per-fixation logs, per-event logs) into typed records, tracks which
//! analysis segment each record belongs to, and aggregates per-scene
//! feature values into tab-separated tables.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Gazekit                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────┐   ┌──────────────────┐   │
//! │  │   Record   │──▶│   Segment    │──▶│  Scene / Segment │   │
//! │  │   Parser   │   │   Binding    │   │  (study-defined) │   │
//! │  └────────────┘   └──────────────┘   └──────────────────┘   │
//! │                                              │               │
//! │                                              ▼               │
//! │  ┌────────────┐                      ┌──────────────────┐   │
//! │  │  Console   │◀─────────────────────│     Feature      │   │
//! │  │  Report    │                      │     Export       │   │
//! │  └────────────┘                      └──────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Study-specific code (anything implementing [`Study`]) reads the
//! instrument files, partitions records into scenes and segments, and
//! decides validity; this crate supplies the record model, the binding
//! invariant, and the export machinery.
//!
//! # Example
//!
//! ```no_run
//! use gazekit::{read_events, Config};
//!
//! let config = Config::default();
//! let events = read_events("Event-Data.tsv", &config).expect("unreadable event log");
//! println!("{} events", events.len());
//! ```

pub mod config;
pub mod export;
pub mod participant;
pub mod record;
pub mod report;
pub mod study;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use export::{
    export_features_all, render_tsv, write_features_tsv, ColumnPolicy, ExportError,
    ExportOptions, FeatureTable,
};
pub use participant::{FeatureQuery, FeatureSource, FeatureValue, Participant};
pub use record::{
    read_events, read_fixations, read_samples, Event, Fixation, ReadError, RecordError,
    SamplePoint, SAMPLE_FIELD_COUNT, WORST_VALIDITY_CODE,
};
pub use report::{print_report, render_report};
pub use study::{SceneSpan, Study, StudyError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
