use super::super::domain::DisciplineRecord;
use super::super::matrix::{PautaMatrix, SummaryGrades};
use super::metadata::DocumentMetadata;
use super::views::{DisciplineView, MiniPautaDocument, MiniPautaRow, SummaryGradesView};

/// Shape the matrix into the quick per-student roster for one discipline.
pub fn mini_pauta(
    matrix: &PautaMatrix,
    discipline: &DisciplineRecord,
    metadata: DocumentMetadata,
) -> MiniPautaDocument {
    let rows = matrix
        .students()
        .iter()
        .map(|student| {
            let grades = match matrix.summary(&student.id, &discipline.id) {
                Some(SummaryGrades::Terms { t1, t2, t3 }) => {
                    SummaryGradesView::Terms { t1, t2, t3 }
                }
                Some(SummaryGrades::Single { composite }) => {
                    SummaryGradesView::Single { composite }
                }
                // No cell means the discipline was not resolvable for this
                // matrix; the service never lets that happen, but an empty
                // row is still the right degraded shape.
                None => SummaryGradesView::Terms {
                    t1: None,
                    t2: None,
                    t3: None,
                },
            };
            MiniPautaRow {
                student: student.id.clone(),
                name: student.name.clone(),
                photo: student.photo.clone(),
                grades,
            }
        })
        .collect();

    MiniPautaDocument {
        metadata,
        discipline: DisciplineView {
            id: discipline.id.clone(),
            name: discipline.name.clone(),
        },
        rows,
    }
}
