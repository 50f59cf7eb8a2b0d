//! Storage-boundary contracts.
//!
//! Persistence and querying of raw rows live outside this crate; the engine
//! only sees these traits, and it sees every relationship as an explicit,
//! already-normalized collection.

use serde::{Deserialize, Serialize};

use super::domain::{
    AssessmentRecord, ClassId, ClassProfile, CourseId, DisciplineId, DisciplineRecord,
    EvaluationModel, SchoolId, StudentRecord,
};
use super::resolver::{CurriculumEntryRow, DisciplineAssignmentRow};

/// Upstream query layers sometimes hand back a lone record where the schema
/// allows a collection, depending on cardinality assumptions made at query
/// time. `Related` absorbs both shapes at deserialization so everything past
/// the source boundary works with a plain `Vec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Related<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Related<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Related::One(item) => vec![item],
            Related::Many(items) => items,
        }
    }
}

impl<T> From<Related<T>> for Vec<T> {
    fn from(value: Related<T>) -> Self {
        value.into_vec()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("record not found")]
    NotFound,
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Evaluation-model configuration rows for the resolver.
pub trait EvaluationConfigSource: Send + Sync {
    fn discipline_assignments(
        &self,
        course: &CourseId,
        class: &ClassId,
    ) -> Result<Vec<DisciplineAssignmentRow>, SourceError>;

    fn curriculum_entries(&self, course: &CourseId)
        -> Result<Vec<CurriculumEntryRow>, SourceError>;

    fn school_default_model(
        &self,
        school: &SchoolId,
    ) -> Result<Option<EvaluationModel>, SourceError>;
}

/// Roster and class metadata rows.
pub trait RosterSource: Send + Sync {
    fn class_profile(&self, class: &ClassId) -> Result<ClassProfile, SourceError>;

    fn class_students(&self, class: &ClassId) -> Result<Vec<StudentRecord>, SourceError>;

    fn class_disciplines(
        &self,
        course: &CourseId,
        class: &ClassId,
    ) -> Result<Vec<DisciplineRecord>, SourceError>;
}

/// Raw assessment score rows, optionally narrowed to one discipline.
pub trait AssessmentSource: Send + Sync {
    fn class_assessments(
        &self,
        class: &ClassId,
        discipline: Option<&DisciplineId>,
    ) -> Result<Vec<AssessmentRecord>, SourceError>;
}
