use crate::modules::coscholastic::model::{CoscholasticAssessment, UpsertCoscholasticDto};
use crate::modules::coscholastic::service::CoscholasticService;
use crate::modules::results::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/coscholastic",
    request_body = UpsertCoscholasticDto,
    responses(
        (status = 200, description = "Assessment saved", body = CoscholasticAssessment),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Co-scholastic"
)]
#[instrument(skip(state, dto))]
pub async fn upsert_coscholastic(
    State(state): State<AppState>,
    Json(dto): Json<UpsertCoscholasticDto>,
) -> Result<Json<CoscholasticAssessment>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let assessment = CoscholasticService::upsert(&state, dto).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    get,
    path = "/api/coscholastic/student/{student_id}/year/{academic_year}",
    params(
        ("student_id" = String, Path, description = "Student identifier"),
        ("academic_year" = String, Path, description = "Academic year, e.g. 2024-25")
    ),
    responses(
        (status = 200, description = "Student's assessments for the year", body = Vec<CoscholasticAssessment>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Co-scholastic"
)]
#[instrument(skip(state))]
pub async fn get_student_coscholastic(
    State(state): State<AppState>,
    Path((student_id, academic_year)): Path<(String, String)>,
) -> Result<Json<Vec<CoscholasticAssessment>>, AppError> {
    let assessments =
        CoscholasticService::student_assessments(&state, &student_id, &academic_year).await?;
    Ok(Json(assessments))
}
