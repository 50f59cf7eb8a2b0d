use std::collections::BTreeMap;

use super::super::domain::{StudentRecord, Trimester};
use super::super::matrix::{DisciplineCell, PautaMatrix};
use super::detailed::component_columns;
use super::metadata::DocumentMetadata;
use super::views::{
    DisciplineView, LedgerDisciplineGrades, LedgerDocument, LedgerPeriodGrades, LedgerStudentRow,
};

/// Shape the matrix into the full class ledger: every student, every
/// discipline, every period, plus the annual roll-ups.
pub fn class_ledger(matrix: &PautaMatrix, metadata: DocumentMetadata) -> LedgerDocument {
    let issued_on = metadata.issued_at.date_naive();

    let disciplines = matrix
        .disciplines()
        .iter()
        .map(|discipline| DisciplineView {
            id: discipline.id.clone(),
            name: discipline.name.clone(),
        })
        .collect();

    let students = matrix
        .students()
        .iter()
        .map(|student| ledger_row(matrix, student, issued_on))
        .collect();

    LedgerDocument {
        metadata,
        disciplines,
        students,
    }
}

fn ledger_row(
    matrix: &PautaMatrix,
    student: &StudentRecord,
    issued_on: chrono::NaiveDate,
) -> LedgerStudentRow {
    let mut disciplines = BTreeMap::new();
    for discipline in matrix.disciplines() {
        let Some(cell) = matrix.cell(&student.id, &discipline.id) else {
            continue;
        };
        let grades = match cell {
            DisciplineCell::Terms {
                grades,
                final_average,
            } => {
                let period = |term: Trimester| {
                    let grade = &grades[term.index()];
                    LedgerPeriodGrades {
                        components: component_columns(grade),
                        mt: grade.composite,
                    }
                };
                LedgerDisciplineGrades::Terms {
                    t1: period(Trimester::First),
                    t2: period(Trimester::Second),
                    t3: period(Trimester::Third),
                    mfd: *final_average,
                }
            }
            DisciplineCell::Annual { grade } => LedgerDisciplineGrades::Single {
                components: component_columns(grade),
                composite: grade.composite,
            },
        };
        disciplines.insert(discipline.id.clone(), grades);
    }

    LedgerStudentRow {
        roll_number: student.roll_number,
        name: student.name.clone(),
        age: student.age_on(issued_on),
        sex: student.sex.map(|sex| sex.label()),
        disciplines,
        remarks: student.remarks.clone(),
    }
}
