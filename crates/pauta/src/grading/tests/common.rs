use std::collections::HashMap;

use chrono::NaiveDate;

use crate::grading::domain::{
    AssessmentRecord, ClassId, ClassProfile, CourseId, CurriculumEntryId, DisciplineId,
    DisciplineRecord, EvaluationComponent, EvaluationMode, EvaluationModel, SchoolId,
    SchoolProfile, Sex, StudentId, StudentRecord, Trimester,
};
use crate::grading::codes::ComponentCode;
use crate::grading::resolver::{
    CurriculumEntryRow, DisciplineAssignmentRow, ModelCatalog, ResolvedModelContext,
};
use crate::grading::weights::ComponentWeightIndex;

pub(super) fn school() -> SchoolProfile {
    SchoolProfile {
        id: SchoolId::from("esc-01"),
        name: "Escola Secundária do Rangel".to_string(),
        director: Some("J. Afonso".to_string()),
    }
}

pub(super) fn class_profile() -> ClassProfile {
    ClassProfile {
        id: ClassId::from("t-9b"),
        name: "9ª B".to_string(),
        course: CourseId::from("c-geral"),
        course_name: "Ciclo Geral".to_string(),
        school_year: "2025/2026".to_string(),
        class_teacher: Some("R. Tavares".to_string()),
    }
}

pub(super) fn component(code: &str, weight: Option<f64>) -> EvaluationComponent {
    EvaluationComponent {
        code: code.to_string(),
        weight,
        required: false,
    }
}

/// The common trimester model: MAC 0.3, NPP 0.3, NPT 0.4. The period test
/// is configured under its "PT" spelling to keep the alias path exercised.
pub(super) fn standard_model() -> EvaluationModel {
    EvaluationModel {
        mode: EvaluationMode::Period,
        components: vec![
            component(ComponentCode::MAC, Some(0.3)),
            component(ComponentCode::NPP, Some(0.3)),
            component("PT", Some(0.4)),
        ],
    }
}

/// Same components, no weights configured: everything defaults to 1.
pub(super) fn unweighted_model() -> EvaluationModel {
    EvaluationModel {
        mode: EvaluationMode::Period,
        components: vec![
            component(ComponentCode::MAC, None),
            component(ComponentCode::NPP, None),
            component(ComponentCode::NPT, None),
        ],
    }
}

pub(super) fn annual_model() -> EvaluationModel {
    EvaluationModel {
        mode: EvaluationMode::Annual,
        components: vec![
            component(ComponentCode::MAC, None),
            component(ComponentCode::NPP, None),
        ],
    }
}

pub(super) fn standard_index() -> ComponentWeightIndex {
    ComponentWeightIndex::build(&standard_model()).expect("standard model indexes")
}

pub(super) fn student(id: &str, name: &str, roll: Option<u32>) -> StudentRecord {
    StudentRecord {
        id: StudentId::from(id),
        name: name.to_string(),
        roll_number: roll,
        photo: None,
        birth_date: NaiveDate::from_ymd_opt(2011, 3, 14),
        sex: Some(Sex::Female),
        remarks: None,
    }
}

pub(super) fn discipline(id: &str, name: &str) -> DisciplineRecord {
    DisciplineRecord {
        id: DisciplineId::from(id),
        name: name.to_string(),
    }
}

pub(super) fn score(
    student: &str,
    discipline: &str,
    period: Option<Trimester>,
    code: &str,
    value: Option<f64>,
) -> AssessmentRecord {
    AssessmentRecord {
        student: StudentId::from(student),
        discipline: DisciplineId::from(discipline),
        period,
        component_code: code.to_string(),
        value,
    }
}

pub(super) fn resolved(model: EvaluationModel) -> ResolvedModelContext {
    ResolvedModelContext {
        model,
        provenance: crate::grading::resolver::ModelProvenance::CurriculumMatrix,
    }
}

pub(super) fn models_for(
    pairs: &[(&str, EvaluationModel)],
) -> HashMap<DisciplineId, ResolvedModelContext> {
    pairs
        .iter()
        .map(|(id, model)| (DisciplineId::from(*id), resolved(model.clone())))
        .collect()
}

pub(super) fn assignment(
    discipline: &str,
    active: bool,
    override_model: Option<EvaluationModel>,
    entry: Option<&str>,
) -> DisciplineAssignmentRow {
    DisciplineAssignmentRow {
        course: CourseId::from("c-geral"),
        class: ClassId::from("t-9b"),
        discipline: DisciplineId::from(discipline),
        active,
        override_active: override_model.is_some(),
        override_model,
        curriculum_entry: entry.map(CurriculumEntryId::from),
    }
}

pub(super) fn curriculum_entry(
    id: &str,
    discipline: &str,
    active: bool,
    model: EvaluationModel,
) -> CurriculumEntryRow {
    CurriculumEntryRow {
        id: CurriculumEntryId::from(id),
        discipline: DisciplineId::from(discipline),
        active,
        model,
    }
}

pub(super) fn catalog(
    assignments: Vec<DisciplineAssignmentRow>,
    curriculum: Vec<CurriculumEntryRow>,
    school_default: Option<EvaluationModel>,
) -> ModelCatalog {
    ModelCatalog {
        assignments,
        curriculum,
        school_default,
    }
}
