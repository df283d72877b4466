//! Right-aligned console report of per-segment and per-scene features.
//!
//! Diagnostic output only; the persisted export lives in [`crate::export`].

use crate::participant::{FeatureQuery, FeatureValue, Participant};

const SEGMENT_ID_LABEL: &str = "seg_id";
const SCENE_ID_LABEL: &str = "sc_id";

/// Render the report for one participant.
///
/// Emits the participant id, then for every valid segment and every valid
/// scene a name row and a value row, cells right-aligned to the widest
/// cell plus one space. Invalid children are always skipped here.
pub fn render_report(participant: &Participant) -> String {
    let query = FeatureQuery::default();
    let mut out = format!("PID: {}\n", participant.id());

    for segment in participant.segments() {
        if !segment.is_valid() {
            continue;
        }
        let (names, values) = segment.features(&query);
        out.push_str(&format_pair(SEGMENT_ID_LABEL, segment.id(), &names, &values));
    }

    for scene in participant.scenes() {
        if !scene.is_valid() {
            continue;
        }
        let (names, values) = scene.features(&query);
        out.push_str(&format_pair(SCENE_ID_LABEL, scene.id(), &names, &values));
    }

    out
}

/// Print the report for one participant to stdout.
pub fn print_report(participant: &Participant) {
    print!("{}", render_report(participant));
}

fn format_pair(id_label: &str, id: &str, names: &[String], values: &[FeatureValue]) -> String {
    let mut name_cells = vec![id_label.to_string()];
    name_cells.extend(names.iter().cloned());

    let mut value_cells = vec![id.to_string()];
    value_cells.extend(values.iter().map(|v| v.to_string()));

    let width = name_cells
        .iter()
        .chain(value_cells.iter())
        .map(|c| c.len())
        .max()
        .unwrap_or(0)
        + 1;

    format!(
        "{}\n{}\n",
        format_row(&name_cells, width),
        format_row(&value_cells, width)
    )
}

fn format_row(cells: &[String], width: usize) -> String {
    cells
        .iter()
        .map(|c| format!("{c:>width$}"))
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::FeatureSource;

    struct StubScene {
        id: String,
        valid: bool,
    }

    impl FeatureSource for StubScene {
        fn id(&self) -> &str {
            &self.id
        }

        fn is_valid(&self) -> bool {
            self.valid
        }

        fn features(&self, _query: &FeatureQuery) -> (Vec<String>, Vec<FeatureValue>) {
            (
                vec!["fixationrate".to_string(), "length".to_string()],
                vec![FeatureValue::Float(0.25), FeatureValue::Int(1500)],
            )
        }
    }

    fn scene(id: &str, valid: bool) -> Box<dyn FeatureSource> {
        Box::new(StubScene {
            id: id.to_string(),
            valid,
        })
    }

    #[test]
    fn test_report_header_and_valid_children_only() {
        let mut participant = Participant::new("P01", true);
        participant.add_scene(scene("sc1", true));
        participant.add_scene(scene("sc2", false));
        participant.add_segment(scene("seg1", true));

        let report = render_report(&participant);
        assert!(report.starts_with("PID: P01\n"));
        assert!(report.contains("sc1"));
        assert!(report.contains("seg1"));
        assert!(!report.contains("sc2"));
    }

    #[test]
    fn test_rows_share_cell_width() {
        let mut participant = Participant::new("P01", true);
        participant.add_scene(scene("sc1", true));

        let report = render_report(&participant);
        let lines: Vec<&str> = report.lines().collect();
        // PID line, then a name row and a value row per valid scene.
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), lines[2].len());
        assert!(lines[1].ends_with("length"));
        assert!(lines[2].ends_with("1500"));
    }
}
