use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use serde_json::json;

use pauta::grading::{
    AssessmentRecord, AssessmentSource, ClassId, ClassProfile, CourseId, CurriculumEntryId,
    CurriculumEntryRow, DisciplineAssignmentRow, DisciplineId, DisciplineRecord,
    EvaluationComponent, EvaluationConfigSource, EvaluationMode, EvaluationModel, GradingService,
    Related, RosterSource, SchoolId, SchoolProfile, Sex, SourceError, StudentId, StudentRecord,
    Trimester,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryConfigSource {
    pub(crate) assignments: Vec<DisciplineAssignmentRow>,
    pub(crate) curriculum: Vec<CurriculumEntryRow>,
    pub(crate) school_default: Option<EvaluationModel>,
}

impl EvaluationConfigSource for InMemoryConfigSource {
    fn discipline_assignments(
        &self,
        course: &CourseId,
        class: &ClassId,
    ) -> Result<Vec<DisciplineAssignmentRow>, SourceError> {
        Ok(self
            .assignments
            .iter()
            .filter(|row| row.course == *course && row.class == *class)
            .cloned()
            .collect())
    }

    fn curriculum_entries(
        &self,
        _course: &CourseId,
    ) -> Result<Vec<CurriculumEntryRow>, SourceError> {
        Ok(self.curriculum.clone())
    }

    fn school_default_model(
        &self,
        _school: &SchoolId,
    ) -> Result<Option<EvaluationModel>, SourceError> {
        Ok(self.school_default.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRosterSource {
    pub(crate) classes: Vec<(ClassProfile, Vec<StudentRecord>, Vec<DisciplineRecord>)>,
}

impl InMemoryRosterSource {
    fn class(
        &self,
        class: &ClassId,
    ) -> Result<&(ClassProfile, Vec<StudentRecord>, Vec<DisciplineRecord>), SourceError> {
        self.classes
            .iter()
            .find(|(profile, _, _)| profile.id == *class)
            .ok_or(SourceError::NotFound)
    }
}

impl RosterSource for InMemoryRosterSource {
    fn class_profile(&self, class: &ClassId) -> Result<ClassProfile, SourceError> {
        Ok(self.class(class)?.0.clone())
    }

    fn class_students(&self, class: &ClassId) -> Result<Vec<StudentRecord>, SourceError> {
        Ok(self.class(class)?.1.clone())
    }

    fn class_disciplines(
        &self,
        _course: &CourseId,
        class: &ClassId,
    ) -> Result<Vec<DisciplineRecord>, SourceError> {
        Ok(self.class(class)?.2.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentSource {
    pub(crate) rows: Vec<AssessmentRecord>,
}

impl AssessmentSource for InMemoryAssessmentSource {
    fn class_assessments(
        &self,
        _class: &ClassId,
        discipline: Option<&DisciplineId>,
    ) -> Result<Vec<AssessmentRecord>, SourceError> {
        Ok(self
            .rows
            .iter()
            .filter(|row| discipline.map_or(true, |wanted| row.discipline == *wanted))
            .cloned()
            .collect())
    }
}

/// Raw score row as an upstream export would hand it over: the `values`
/// field is a single number or a list depending on how many assessments of
/// that type were recorded.
#[derive(Debug, Deserialize)]
struct RawScoreRow {
    student: String,
    discipline: String,
    period: Option<u8>,
    component: String,
    values: Related<f64>,
}

impl RawScoreRow {
    fn into_records(self) -> Vec<AssessmentRecord> {
        let period = self.period.and_then(Trimester::from_number);
        self.values
            .into_vec()
            .into_iter()
            .map(|value| AssessmentRecord {
                student: StudentId(self.student.clone()),
                discipline: DisciplineId(self.discipline.clone()),
                period,
                component_code: self.component.clone(),
                value: Some(value),
            })
            .collect()
    }
}

fn component(code: &str, weight: Option<f64>) -> EvaluationComponent {
    EvaluationComponent {
        code: code.to_string(),
        weight,
        required: true,
    }
}

fn student(id: &str, name: &str, roll: Option<u32>, birth: (i32, u32, u32)) -> StudentRecord {
    StudentRecord {
        id: StudentId::from(id),
        name: name.to_string(),
        roll_number: roll,
        photo: Some(format!("fotos/{id}.jpg")),
        birth_date: chrono::NaiveDate::from_ymd_opt(birth.0, birth.1, birth.2),
        sex: Some(if roll.unwrap_or(0) % 2 == 0 {
            Sex::Male
        } else {
            Sex::Female
        }),
        remarks: None,
    }
}

pub(crate) fn demo_school() -> SchoolProfile {
    SchoolProfile {
        id: SchoolId::from("esc-demo"),
        name: "Escola Secundária Njinga Mbandi".to_string(),
        director: Some("E. Kassoma".to_string()),
    }
}

/// Seed one class with a trimester-graded and an annually graded
/// discipline, enough to exercise every document shape.
pub(crate) fn demo_service(
) -> GradingService<InMemoryConfigSource, InMemoryRosterSource, InMemoryAssessmentSource> {
    let course = CourseId::from("c-geral");
    let class = ClassId::from("t-10a");

    let trimester_model = EvaluationModel {
        mode: EvaluationMode::Period,
        components: vec![
            component("MAC", Some(0.3)),
            component("NPP", Some(0.3)),
            component("PT", Some(0.4)),
        ],
    };
    let annual_model = EvaluationModel {
        mode: EvaluationMode::Annual,
        components: vec![component("MAC", None), component("NPP", None)],
    };

    let config = InMemoryConfigSource {
        assignments: vec![
            DisciplineAssignmentRow {
                course: course.clone(),
                class: class.clone(),
                discipline: DisciplineId::from("d-mat"),
                active: true,
                override_model: None,
                override_active: false,
                curriculum_entry: Some(CurriculumEntryId::from("ce-mat")),
            },
            DisciplineAssignmentRow {
                course: course.clone(),
                class: class.clone(),
                discipline: DisciplineId::from("d-efis"),
                active: true,
                override_model: None,
                override_active: false,
                curriculum_entry: Some(CurriculumEntryId::from("ce-efis")),
            },
        ],
        curriculum: vec![
            CurriculumEntryRow {
                id: CurriculumEntryId::from("ce-mat"),
                discipline: DisciplineId::from("d-mat"),
                active: true,
                model: trimester_model,
            },
            CurriculumEntryRow {
                id: CurriculumEntryId::from("ce-efis"),
                discipline: DisciplineId::from("d-efis"),
                active: true,
                model: annual_model,
            },
        ],
        school_default: None,
    };

    let roster = InMemoryRosterSource {
        classes: vec![(
            ClassProfile {
                id: class,
                name: "10ª A".to_string(),
                course,
                course_name: "Ciclo Geral".to_string(),
                school_year: "2025/2026".to_string(),
                class_teacher: Some("T. Quixina".to_string()),
            },
            vec![
                student("a-1", "Ana Paula Ginga", Some(1), (2010, 2, 11)),
                student("a-2", "Bruno Tati", Some(2), (2009, 11, 30)),
                student("a-3", "Carla Muteka", Some(3), (2010, 6, 5)),
                student("a-4", "Domingos Sebastião", None, (2010, 9, 18)),
            ],
            vec![
                DisciplineRecord {
                    id: DisciplineId::from("d-mat"),
                    name: "Matemática".to_string(),
                },
                DisciplineRecord {
                    id: DisciplineId::from("d-efis"),
                    name: "Educação Física".to_string(),
                },
            ],
        )],
    };

    let assessments = InMemoryAssessmentSource {
        rows: demo_assessments(),
    };

    GradingService::new(
        demo_school(),
        Arc::new(config),
        Arc::new(roster),
        Arc::new(assessments),
    )
}

fn demo_assessments() -> Vec<AssessmentRecord> {
    // Shaped like an upstream export: note the one-or-many `values`.
    let raw = json!([
        { "student": "a-1", "discipline": "d-mat", "period": 1, "component": "MAC", "values": [13.0, 15.0] },
        { "student": "a-1", "discipline": "d-mat", "period": 1, "component": "NPP", "values": 16.0 },
        { "student": "a-1", "discipline": "d-mat", "period": 1, "component": "PT", "values": 12.0 },
        { "student": "a-1", "discipline": "d-mat", "period": 2, "component": "MAC", "values": 12.0 },
        { "student": "a-1", "discipline": "d-mat", "period": 2, "component": "NPP", "values": 13.0 },
        { "student": "a-1", "discipline": "d-mat", "period": 2, "component": "NPT", "values": 14.0 },
        { "student": "a-1", "discipline": "d-mat", "period": 3, "component": "MAC", "values": 14.0 },
        { "student": "a-1", "discipline": "d-mat", "period": 3, "component": "NPP", "values": 15.0 },
        { "student": "a-1", "discipline": "d-mat", "period": 3, "component": "NPT", "values": 13.0 },
        { "student": "a-2", "discipline": "d-mat", "period": 1, "component": "MAC", "values": 9.0 },
        { "student": "a-2", "discipline": "d-mat", "period": 1, "component": "PT", "values": 11.0 },
        { "student": "a-3", "discipline": "d-mat", "period": 1, "component": "MAC", "values": [10.0, 12.0, 11.0] },
        { "student": "a-1", "discipline": "d-efis", "component": "MAC", "values": [16.0, 18.0] },
        { "student": "a-1", "discipline": "d-efis", "component": "NPP", "values": 17.0 },
        { "student": "a-2", "discipline": "d-efis", "component": "MAC", "values": 14.0 },
    ]);

    let rows: Vec<RawScoreRow> =
        serde_json::from_value(raw).expect("demo seed rows are well-formed");
    rows.into_iter().flat_map(RawScoreRow::into_records).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_rows_normalize_one_and_many_value_shapes() {
        let rows = demo_assessments();
        let a1_mac_t1: Vec<_> = rows
            .iter()
            .filter(|row| {
                row.student == StudentId::from("a-1")
                    && row.component_code == "MAC"
                    && row.period == Some(Trimester::First)
            })
            .collect();
        // The [13, 15] list fans out into two records.
        assert_eq!(a1_mac_t1.len(), 2);

        let efis_untagged = rows
            .iter()
            .filter(|row| row.discipline == DisciplineId::from("d-efis"))
            .all(|row| row.period.is_none());
        assert!(efis_untagged);
    }

    #[test]
    fn demo_service_produces_a_ledger() {
        let service = demo_service();
        let ledger = service
            .class_ledger(&ClassId::from("t-10a"), chrono::Utc::now())
            .expect("demo ledger builds");
        assert_eq!(ledger.students.len(), 4);
        assert_eq!(ledger.disciplines.len(), 2);
    }
}
