use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{ClassId, ClassProfile, DisciplineId, DisciplineRecord, SchoolProfile, Trimester};
use super::matrix::{MatrixOptions, PautaMatrix, PautaMatrixBuilder};
use super::report::views::{DetailedRosterDocument, LedgerDocument, MiniPautaDocument};
use super::report::{self, DocumentKind, DocumentMetadata};
use super::repository::{AssessmentSource, EvaluationConfigSource, RosterSource, SourceError};
use super::resolver::{ModelCatalog, ModelResolutionError, ModelResolver, ResolvedModelContext};
use super::weights::WeightConfigError;

/// Error raised by the grading service. Resolution and weight failures are
/// fatal for the whole request; a document is never produced partially.
#[derive(Debug, thiserror::Error)]
pub enum GradingServiceError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Resolution(#[from] ModelResolutionError),
    #[error(transparent)]
    Weights(#[from] WeightConfigError),
}

/// Facade composing the configuration, roster, and assessment sources into
/// the three report documents. Holds no mutable state; every call operates
/// on whatever snapshot the sources currently serve.
pub struct GradingService<C, R, A> {
    school: SchoolProfile,
    config: Arc<C>,
    roster: Arc<R>,
    assessments: Arc<A>,
}

impl<C, R, A> GradingService<C, R, A>
where
    C: EvaluationConfigSource + 'static,
    R: RosterSource + 'static,
    A: AssessmentSource + 'static,
{
    pub fn new(school: SchoolProfile, config: Arc<C>, roster: Arc<R>, assessments: Arc<A>) -> Self {
        Self {
            school,
            config,
            roster,
            assessments,
        }
    }

    pub fn school(&self) -> &SchoolProfile {
        &self.school
    }

    /// Quick roster: term composites (or the single annual composite) per
    /// student for one discipline.
    pub fn summary_roster(
        &self,
        class: &ClassId,
        discipline: &DisciplineId,
        issued_at: DateTime<Utc>,
    ) -> Result<MiniPautaDocument, GradingServiceError> {
        let profile = self.roster.class_profile(class)?;
        let record = self.class_discipline(&profile, discipline)?;
        let models = self.resolve_models(&profile, std::slice::from_ref(&record))?;
        let matrix = self.build_matrix(&profile, vec![record.clone()], &models, None)?;

        let metadata =
            DocumentMetadata::issue(DocumentKind::MiniPauta, &self.school, &profile, None, issued_at);
        Ok(report::mini_pauta(&matrix, &record, metadata))
    }

    /// Detailed roster: per-component values plus the composite for one
    /// discipline and trimester.
    pub fn detailed_roster(
        &self,
        class: &ClassId,
        discipline: &DisciplineId,
        period: Trimester,
        issued_at: DateTime<Utc>,
    ) -> Result<DetailedRosterDocument, GradingServiceError> {
        let profile = self.roster.class_profile(class)?;
        let record = self.class_discipline(&profile, discipline)?;
        let models = self.resolve_models(&profile, std::slice::from_ref(&record))?;
        let mode = models[&record.id].model.mode;
        let matrix = self.build_matrix(&profile, vec![record.clone()], &models, Some(period))?;

        let metadata = DocumentMetadata::issue(
            DocumentKind::DetailedRoster,
            &self.school,
            &profile,
            Some(period),
            issued_at,
        );
        Ok(report::detailed_roster(&matrix, &record, mode, period, metadata))
    }

    /// Full class ledger across every discipline taught to the class.
    pub fn class_ledger(
        &self,
        class: &ClassId,
        issued_at: DateTime<Utc>,
    ) -> Result<LedgerDocument, GradingServiceError> {
        let profile = self.roster.class_profile(class)?;
        let disciplines = self.roster.class_disciplines(&profile.course, class)?;
        let models = self.resolve_models(&profile, &disciplines)?;
        let matrix = self.build_matrix(&profile, disciplines, &models, None)?;

        let metadata =
            DocumentMetadata::issue(DocumentKind::ClassLedger, &self.school, &profile, None, issued_at);
        Ok(report::class_ledger(&matrix, metadata))
    }

    fn class_discipline(
        &self,
        profile: &ClassProfile,
        discipline: &DisciplineId,
    ) -> Result<DisciplineRecord, GradingServiceError> {
        let disciplines = self.roster.class_disciplines(&profile.course, &profile.id)?;
        disciplines
            .into_iter()
            .find(|record| record.id == *discipline)
            .ok_or(GradingServiceError::Source(SourceError::NotFound))
    }

    /// Resolve the effective model for each discipline up front; a single
    /// unresolvable discipline aborts the whole document.
    fn resolve_models(
        &self,
        profile: &ClassProfile,
        disciplines: &[DisciplineRecord],
    ) -> Result<HashMap<DisciplineId, ResolvedModelContext>, GradingServiceError> {
        let catalog = ModelCatalog {
            assignments: self
                .config
                .discipline_assignments(&profile.course, &profile.id)?,
            curriculum: self.config.curriculum_entries(&profile.course)?,
            school_default: self.config.school_default_model(&self.school.id)?,
        };
        let resolver = ModelResolver::new(&self.school.id, &catalog);

        let mut models = HashMap::with_capacity(disciplines.len());
        for discipline in disciplines {
            let context = resolver.resolve(&profile.course, &profile.id, &discipline.id)?;
            models.insert(discipline.id.clone(), context);
        }
        Ok(models)
    }

    fn build_matrix(
        &self,
        profile: &ClassProfile,
        disciplines: Vec<DisciplineRecord>,
        models: &HashMap<DisciplineId, ResolvedModelContext>,
        period_filter: Option<Trimester>,
    ) -> Result<PautaMatrix, GradingServiceError> {
        let students = self.roster.class_students(&profile.id)?;
        let narrowed = match disciplines.as_slice() {
            [single] => Some(&single.id),
            _ => None,
        };
        let assessments = self.assessments.class_assessments(&profile.id, narrowed)?;

        let builder = PautaMatrixBuilder::with_options(MatrixOptions { period_filter });
        Ok(builder.build(students, disciplines, &assessments, models)?)
    }
}
