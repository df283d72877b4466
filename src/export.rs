//! Feature aggregation and tabular export.
//!
//! Walks a participant's scenes, asks each one for its feature names and
//! values, and assembles a header + rows table for TSV output. Which
//! column set "wins" when scenes disagree is governed by an explicit
//! [`ColumnPolicy`] rather than an accident of iteration order.

use crate::participant::{FeatureQuery, FeatureValue, Participant};
use log::warn;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Column holding the participant id when `include_id` is set.
pub const PARTICIPANT_ID_COLUMN: &str = "Part_id";
/// Column holding the scene id.
pub const SCENE_ID_COLUMN: &str = "Sc_id";

/// How the exported column set is chosen when scenes (or participants)
/// report heterogeneous feature sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnPolicy {
    /// Capture columns from the first included scene; a multi-participant
    /// batch keeps the last processed participant's columns. Rows are
    /// emitted as returned, so heterogeneous scenes silently misalign.
    /// This reproduces the historical exporter behavior.
    #[default]
    FirstWins,
    /// Alphabetically sorted union of all reported feature names, after
    /// the fixed leading columns; cells a scene did not report are empty.
    Union,
    /// Fail with [`ExportError::ColumnMismatch`] on any disagreement.
    RequireUniform,
}

/// Options controlling a feature export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Passed through unchanged to every scene
    pub query: FeatureQuery,
    /// Prepend a participant id column to every row
    pub include_id: bool,
    /// Skip scenes (not participants) whose validity flag is false
    pub require_valid: bool,
    /// Column-selection rule
    pub column_policy: ColumnPolicy,
}

impl Default for ExportOptions {
    /// The historical defaults: no filters, no id column, only valid
    /// scenes, first-wins columns.
    fn default() -> Self {
        Self {
            query: FeatureQuery::default(),
            include_id: false,
            require_valid: true,
            column_policy: ColumnPolicy::default(),
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// An aggregated feature table: one header, one row per included scene.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FeatureValue>>,
}

impl FeatureTable {
    /// Render as tab-separated text: a header line followed by one line
    /// per row, every line newline-terminated.
    pub fn to_tsv(&self) -> String {
        render_tsv(&self.columns, &self.rows)
    }
}

/// Export errors.
#[derive(Debug)]
pub enum ExportError {
    /// A batch export was asked for zero participants.
    EmptyInput,
    /// Under [`ColumnPolicy::RequireUniform`], `id` reported a feature
    /// set different from the captured one.
    ColumnMismatch { id: String },
    Io(std::io::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::EmptyInput => write!(f, "no participants were supplied to the export"),
            ExportError::ColumnMismatch { id } => {
                write!(f, "feature columns of {id} do not match the captured column set")
            }
            ExportError::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl Participant {
    /// Aggregate this participant's per-scene features into a table.
    ///
    /// Scenes are visited in stored order. With `require_valid`, an
    /// invalid scene is skipped with a logged diagnostic and contributes
    /// neither a row nor columns. Each row starts with the optional
    /// participant id column and the scene id column. A participant with
    /// zero qualifying scenes yields an empty row set with only the
    /// leading columns.
    pub fn export_features(&self, options: &ExportOptions) -> Result<FeatureTable, ExportError> {
        let mut included: Vec<SceneExport> = Vec::new();

        for scene in self.scenes() {
            if options.require_valid && !scene.is_valid() {
                warn!(
                    "participant {}: scene {} dropped, validity check failed",
                    self.id(),
                    scene.id()
                );
                continue;
            }
            let (names, values) = scene.features(&options.query);
            included.push(SceneExport {
                scene_id: scene.id().to_string(),
                names,
                values,
            });
        }

        assemble(self.id(), &included, options)
    }

    /// [`export_features`](Self::export_features) rendered as TSV text.
    pub fn export_features_tsv(&self, options: &ExportOptions) -> Result<String, ExportError> {
        Ok(self.export_features(options)?.to_tsv())
    }
}

/// Aggregate features for a batch of participants.
///
/// Fails with [`ExportError::EmptyInput`] when `participants` is empty.
/// A participant whose overall validity flag is false is skipped with a
/// logged diagnostic and produces no rows. Rows are concatenated in input
/// order; column selection across participants follows the configured
/// [`ColumnPolicy`].
pub fn export_features_all(
    participants: &[Participant],
    options: &ExportOptions,
) -> Result<FeatureTable, ExportError> {
    if participants.is_empty() {
        return Err(ExportError::EmptyInput);
    }

    let mut included: Vec<(String, FeatureTable)> = Vec::new();
    for participant in participants {
        if !participant.is_valid() {
            warn!(
                "participant {} dropped, validity check failed",
                participant.id()
            );
            continue;
        }
        let table = participant.export_features(options)?;
        included.push((participant.id().to_string(), table));
    }

    let leading = leading_columns(options);
    match options.column_policy {
        ColumnPolicy::FirstWins => {
            // The historical batch exporter overwrote the captured columns
            // on every participant, so the last one wins.
            let columns = included
                .last()
                .map(|(_, t)| t.columns.clone())
                .unwrap_or(leading);
            let rows = included.into_iter().flat_map(|(_, t)| t.rows).collect();
            Ok(FeatureTable { columns, rows })
        }
        ColumnPolicy::RequireUniform => {
            if let Some((_, first)) = included.first() {
                let captured = first.columns.clone();
                for (id, table) in &included {
                    if table.columns != captured {
                        return Err(ExportError::ColumnMismatch { id: id.clone() });
                    }
                }
                let rows = included.into_iter().flat_map(|(_, t)| t.rows).collect();
                Ok(FeatureTable {
                    columns: captured,
                    rows,
                })
            } else {
                Ok(FeatureTable {
                    columns: leading,
                    rows: Vec::new(),
                })
            }
        }
        ColumnPolicy::Union => {
            let tables: Vec<FeatureTable> = included.into_iter().map(|(_, t)| t).collect();
            Ok(unify_tables(&tables, leading))
        }
    }
}

/// Render a header and rows as tab-separated text.
///
/// Pure: identical input always produces byte-identical output. Values
/// use their default numeric formatting; missing cells are empty. Every
/// line is newline-terminated with no trailing delimiter.
pub fn render_tsv(columns: &[String], rows: &[Vec<FeatureValue>]) -> String {
    let mut out = columns.join("\t");
    out.push('\n');
    for row in rows {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

/// Aggregate a batch of participants and write the table to `path`.
///
/// The file handle is scoped to this call and released whether or not the
/// write completes; a failure partway leaves a truncated file (there is no
/// atomic-replace guarantee). Write failures propagate unmodified.
pub fn write_features_tsv(
    participants: &[Participant],
    path: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let table = export_features_all(participants, options)?;
    let mut file = File::create(path)?;
    file.write_all(table.to_tsv().as_bytes())?;
    Ok(())
}

struct SceneExport {
    scene_id: String,
    names: Vec<String>,
    values: Vec<FeatureValue>,
}

fn leading_columns(options: &ExportOptions) -> Vec<String> {
    let mut columns = Vec::new();
    if options.include_id {
        columns.push(PARTICIPANT_ID_COLUMN.to_string());
    }
    columns.push(SCENE_ID_COLUMN.to_string());
    columns
}

fn assemble(
    participant_id: &str,
    included: &[SceneExport],
    options: &ExportOptions,
) -> Result<FeatureTable, ExportError> {
    let leading = leading_columns(options);

    let leading_values = |scene_id: &str| -> Vec<FeatureValue> {
        let mut row = Vec::new();
        if options.include_id {
            row.push(FeatureValue::from(participant_id));
        }
        row.push(FeatureValue::from(scene_id));
        row
    };

    match options.column_policy {
        ColumnPolicy::FirstWins => {
            let mut columns = leading;
            if let Some(first) = included.first() {
                columns.extend(first.names.iter().cloned());
            }
            let rows = included
                .iter()
                .map(|scene| {
                    let mut row = leading_values(&scene.scene_id);
                    row.extend(scene.values.iter().cloned());
                    row
                })
                .collect();
            Ok(FeatureTable { columns, rows })
        }
        ColumnPolicy::RequireUniform => {
            if let Some(first) = included.first() {
                for scene in &included[1..] {
                    if scene.names != first.names {
                        return Err(ExportError::ColumnMismatch {
                            id: scene.scene_id.clone(),
                        });
                    }
                }
            }
            let mut columns = leading;
            if let Some(first) = included.first() {
                columns.extend(first.names.iter().cloned());
            }
            let rows = included
                .iter()
                .map(|scene| {
                    let mut row = leading_values(&scene.scene_id);
                    row.extend(scene.values.iter().cloned());
                    row
                })
                .collect();
            Ok(FeatureTable { columns, rows })
        }
        ColumnPolicy::Union => {
            let names: BTreeSet<&str> = included
                .iter()
                .flat_map(|scene| scene.names.iter().map(String::as_str))
                .collect();

            let mut columns = leading;
            columns.extend(names.iter().map(|n| n.to_string()));

            let rows = included
                .iter()
                .map(|scene| {
                    let by_name: HashMap<&str, &FeatureValue> = scene
                        .names
                        .iter()
                        .map(String::as_str)
                        .zip(scene.values.iter())
                        .collect();
                    let mut row = leading_values(&scene.scene_id);
                    for name in &names {
                        row.push(by_name.get(name).map(|v| (*v).clone()).unwrap_or(FeatureValue::Missing));
                    }
                    row
                })
                .collect();
            Ok(FeatureTable { columns, rows })
        }
    }
}

/// Merge per-participant tables under the union policy: fixed leading
/// columns first, then the alphabetically sorted union of feature names,
/// with rows realigned and gaps left empty.
fn unify_tables(tables: &[FeatureTable], leading: Vec<String>) -> FeatureTable {
    let leading_count = leading.len();

    let names: BTreeSet<&str> = tables
        .iter()
        .flat_map(|t| t.columns[leading_count.min(t.columns.len())..].iter().map(String::as_str))
        .collect();

    let mut columns = leading;
    columns.extend(names.iter().map(|n| n.to_string()));

    let mut rows = Vec::new();
    for table in tables {
        let index_of: HashMap<&str, usize> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        for row in &table.rows {
            let mut unified: Vec<FeatureValue> = row[..leading_count.min(row.len())].to_vec();
            for name in &names {
                let value = index_of
                    .get(name)
                    .and_then(|&i| row.get(i))
                    .cloned()
                    .unwrap_or(FeatureValue::Missing);
                unified.push(value);
            }
            rows.push(unified);
        }
    }

    FeatureTable { columns, rows }
}
