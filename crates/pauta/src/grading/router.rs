use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::{ClassId, DisciplineId, Trimester};
use super::repository::{AssessmentSource, EvaluationConfigSource, RosterSource, SourceError};
use super::resolver::ModelResolutionError;
use super::service::{GradingService, GradingServiceError};

/// Router builder exposing the three report documents.
pub fn grading_router<C, R, A>(service: Arc<GradingService<C, R, A>>) -> Router
where
    C: EvaluationConfigSource + 'static,
    R: RosterSource + 'static,
    A: AssessmentSource + 'static,
{
    Router::new()
        .route(
            "/api/v1/classes/:class_id/disciplines/:discipline_id/pauta",
            get(summary_handler::<C, R, A>),
        )
        .route(
            "/api/v1/classes/:class_id/disciplines/:discipline_id/pauta/trimestre/:period",
            get(detailed_handler::<C, R, A>),
        )
        .route(
            "/api/v1/classes/:class_id/pauta/ledger",
            get(ledger_handler::<C, R, A>),
        )
        .with_state(service)
}

pub(crate) async fn summary_handler<C, R, A>(
    State(service): State<Arc<GradingService<C, R, A>>>,
    Path((class_id, discipline_id)): Path<(String, String)>,
) -> Response
where
    C: EvaluationConfigSource + 'static,
    R: RosterSource + 'static,
    A: AssessmentSource + 'static,
{
    let result = service.summary_roster(
        &ClassId(class_id),
        &DisciplineId(discipline_id),
        Utc::now(),
    );
    match result {
        Ok(document) => (StatusCode::OK, axum::Json(document)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detailed_handler<C, R, A>(
    State(service): State<Arc<GradingService<C, R, A>>>,
    Path((class_id, discipline_id, period)): Path<(String, String, u8)>,
) -> Response
where
    C: EvaluationConfigSource + 'static,
    R: RosterSource + 'static,
    A: AssessmentSource + 'static,
{
    let Some(period) = Trimester::from_number(period) else {
        let payload = json!({ "error": "period must be 1, 2, or 3" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    let result = service.detailed_roster(
        &ClassId(class_id),
        &DisciplineId(discipline_id),
        period,
        Utc::now(),
    );
    match result {
        Ok(document) => (StatusCode::OK, axum::Json(document)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ledger_handler<C, R, A>(
    State(service): State<Arc<GradingService<C, R, A>>>,
    Path(class_id): Path<String>,
) -> Response
where
    C: EvaluationConfigSource + 'static,
    R: RosterSource + 'static,
    A: AssessmentSource + 'static,
{
    match service.class_ledger(&ClassId(class_id), Utc::now()) {
        Ok(document) => (StatusCode::OK, axum::Json(document)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Missing configuration is the caller's problem; broken configuration and
/// unreachable sources are ours. Single source of truth for the mapping;
/// `AppError` delegates here so CLI and route paths cannot drift apart.
pub(crate) fn grading_status(error: &GradingServiceError) -> StatusCode {
    match error {
        GradingServiceError::Source(SourceError::NotFound) => StatusCode::NOT_FOUND,
        GradingServiceError::Resolution(ModelResolutionError::NoModelConfigured { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        GradingServiceError::Resolution(ModelResolutionError::DisciplineMismatch { .. })
        | GradingServiceError::Weights(_)
        | GradingServiceError::Source(SourceError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(error: GradingServiceError) -> Response {
    let status = grading_status(&error);
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
