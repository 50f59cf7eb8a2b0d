use std::collections::BTreeMap;

use super::super::aggregate::AggregatedPeriodGrade;
use super::super::domain::{DisciplineRecord, EvaluationMode, Trimester};
use super::super::matrix::PautaMatrix;
use super::metadata::DocumentMetadata;
use super::views::{DetailedRosterDocument, DetailedRosterRow, DisciplineView};

/// Shape the matrix into the per-component roster for one discipline and
/// period. Annually graded disciplines have no periods; their single
/// virtual-period grades are served and `period` is left unset.
pub fn detailed_roster(
    matrix: &PautaMatrix,
    discipline: &DisciplineRecord,
    mode: EvaluationMode,
    period: Trimester,
    metadata: DocumentMetadata,
) -> DetailedRosterDocument {
    let rows = matrix
        .students()
        .iter()
        .map(|student| {
            let grade = match mode {
                EvaluationMode::Period => matrix.term_grade(&student.id, &discipline.id, period),
                EvaluationMode::Annual => matrix.annual_grade(&student.id, &discipline.id),
            };

            let (components, composite) = match grade {
                Some(grade) => (component_columns(grade), grade.composite),
                None => (BTreeMap::new(), None),
            };

            DetailedRosterRow {
                student: student.id.clone(),
                name: student.name.clone(),
                photo: student.photo.clone(),
                roll_number: student.roll_number,
                components,
                composite,
            }
        })
        .collect();

    DetailedRosterDocument {
        metadata,
        discipline: DisciplineView {
            id: discipline.id.clone(),
            name: discipline.name.clone(),
        },
        period: match mode {
            EvaluationMode::Period => Some(period.number()),
            EvaluationMode::Annual => None,
        },
        rows,
    }
}

pub(super) fn component_columns(grade: &AggregatedPeriodGrade) -> BTreeMap<String, Option<f64>> {
    grade
        .component_values
        .iter()
        .map(|(code, value)| (code.to_string(), *value))
        .collect()
}
