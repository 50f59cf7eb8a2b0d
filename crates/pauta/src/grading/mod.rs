//! Academic evaluation resolution and grade aggregation.
//!
//! Configuration rows and raw assessment scores come in through the source
//! traits; mini-pauta, detailed roster, and class ledger documents come
//! out. Everything in between is a pure transform over the snapshot it was
//! given.

pub mod aggregate;
pub mod codes;
pub mod domain;
pub mod matrix;
pub mod report;
pub mod repository;
pub mod resolver;
pub mod router;
pub mod service;
pub mod weights;

#[cfg(test)]
mod tests;

pub use aggregate::{AggregatedPeriodGrade, AnnualSummary};
pub use codes::{CodeAliasTable, ComponentCode};
pub use domain::{
    AssessmentRecord, ClassId, ClassProfile, CourseId, CurriculumEntryId, DisciplineId,
    DisciplineRecord, EvaluationComponent, EvaluationMode, EvaluationModel, SchoolId,
    SchoolProfile, Sex, StudentId, StudentRecord, Trimester,
};
pub use matrix::{DisciplineCell, MatrixOptions, PautaMatrix, PautaMatrixBuilder, SummaryGrades};
pub use repository::{
    AssessmentSource, EvaluationConfigSource, Related, RosterSource, SourceError,
};
pub use resolver::{
    CurriculumEntryRow, DisciplineAssignmentRow, ModelCatalog, ModelProvenance,
    ModelResolutionError, ModelResolver, ResolvedModelContext,
};
pub use router::grading_router;
pub use service::{GradingService, GradingServiceError};
pub use weights::{ComponentWeightIndex, WeightConfigError};
