//! Evaluation-model resolution.
//!
//! The effective model for a (course, class, discipline) triple is found by
//! walking a fallback chain: discipline-assignment override, then the
//! curriculum-matrix entry the assignment points at, then the school-wide
//! default. A curriculum entry recorded for a different discipline than the
//! one requested is an upstream configuration bug and aborts resolution.

use serde::{Deserialize, Serialize};

use super::domain::{
    ClassId, CourseId, CurriculumEntryId, DisciplineId, EvaluationModel, SchoolId,
};

/// Link row tying a discipline to a class, optionally carrying a
/// discipline-specific model override and a pointer into the curriculum
/// matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineAssignmentRow {
    pub course: CourseId,
    pub class: ClassId,
    pub discipline: DisciplineId,
    pub active: bool,
    pub override_model: Option<EvaluationModel>,
    #[serde(default)]
    pub override_active: bool,
    pub curriculum_entry: Option<CurriculumEntryId>,
}

/// Curriculum-matrix row linking a discipline to its configured model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumEntryRow {
    pub id: CurriculumEntryId,
    pub discipline: DisciplineId,
    pub active: bool,
    pub model: EvaluationModel,
}

/// Configuration rows for one resolution scope, already normalized to
/// unambiguous collections at the source boundary.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    pub assignments: Vec<DisciplineAssignmentRow>,
    pub curriculum: Vec<CurriculumEntryRow>,
    pub school_default: Option<EvaluationModel>,
}

/// Which configuration owner supplied the resolved model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelProvenance {
    DisciplineOverride,
    CurriculumMatrix,
    SchoolDefault,
}

/// The resolved model plus where it came from. Recomputed per lookup,
/// never cached across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedModelContext {
    pub model: EvaluationModel,
    pub provenance: ModelProvenance,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelResolutionError {
    /// Nothing in the chain produced a usable model; callers must not
    /// proceed to grade entry or aggregation.
    #[error("no evaluation model configured for course {course}, class {class}, discipline {discipline}")]
    NoModelConfigured {
        school: SchoolId,
        course: CourseId,
        class: ClassId,
        discipline: DisciplineId,
    },
    /// The curriculum entry an assignment points at is recorded for a
    /// different discipline. Silent fallback would mask a broken link, so
    /// this aborts the request instead.
    #[error("curriculum entry {entry} is recorded for discipline {found}, but discipline {requested} was requested")]
    DisciplineMismatch {
        entry: CurriculumEntryId,
        requested: DisciplineId,
        found: DisciplineId,
    },
}

impl ModelResolutionError {
    /// Integrity failures indicate an upstream configuration bug rather
    /// than a caller mistake; the router maps them to a server error.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, ModelResolutionError::DisciplineMismatch { .. })
    }
}

/// Stateless resolver over a catalog snapshot.
pub struct ModelResolver<'a> {
    school: &'a SchoolId,
    catalog: &'a ModelCatalog,
}

impl<'a> ModelResolver<'a> {
    pub fn new(school: &'a SchoolId, catalog: &'a ModelCatalog) -> Self {
        Self { school, catalog }
    }

    pub fn resolve(
        &self,
        course: &CourseId,
        class: &ClassId,
        discipline: &DisciplineId,
    ) -> Result<ResolvedModelContext, ModelResolutionError> {
        let assignment = self.catalog.assignments.iter().find(|row| {
            row.active
                && row.course == *course
                && row.class == *class
                && row.discipline == *discipline
        });

        if let Some(assignment) = assignment {
            if assignment.override_active {
                if let Some(model) = &assignment.override_model {
                    if model.is_configured() {
                        return Ok(ResolvedModelContext {
                            model: model.clone(),
                            provenance: ModelProvenance::DisciplineOverride,
                        });
                    }
                }
            }

            if let Some(entry_id) = &assignment.curriculum_entry {
                let entry = self
                    .catalog
                    .curriculum
                    .iter()
                    .find(|row| row.id == *entry_id && row.active);
                if let Some(entry) = entry {
                    if entry.discipline != *discipline {
                        return Err(ModelResolutionError::DisciplineMismatch {
                            entry: entry.id.clone(),
                            requested: discipline.clone(),
                            found: entry.discipline.clone(),
                        });
                    }
                    if entry.model.is_configured() {
                        return Ok(ResolvedModelContext {
                            model: entry.model.clone(),
                            provenance: ModelProvenance::CurriculumMatrix,
                        });
                    }
                }
            }
        }

        if let Some(default) = &self.catalog.school_default {
            if default.is_configured() {
                return Ok(ResolvedModelContext {
                    model: default.clone(),
                    provenance: ModelProvenance::SchoolDefault,
                });
            }
        }

        Err(ModelResolutionError::NoModelConfigured {
            school: self.school.clone(),
            course: course.clone(),
            class: class.clone(),
            discipline: discipline.clone(),
        })
    }
}
