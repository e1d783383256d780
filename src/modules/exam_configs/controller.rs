use crate::modules::exam_configs::model::{CreateExamConfigDto, ExamConfig, ExamConfigQuery};
use crate::modules::exam_configs::service::ExamConfigService;
use crate::modules::results::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/exam-configs",
    request_body = CreateExamConfigDto,
    responses(
        (status = 200, description = "Exam configuration saved", body = ExamConfig),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Exam Configs"
)]
#[instrument(skip(state, dto))]
pub async fn create_exam_config(
    State(state): State<AppState>,
    Json(dto): Json<CreateExamConfigDto>,
) -> Result<Json<ExamConfig>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let config = ExamConfigService::create(&state, dto).await?;
    Ok(Json(config))
}

#[utoipa::path(
    get,
    path = "/api/exam-configs",
    params(
        ExamConfigQuery
    ),
    responses(
        (status = 200, description = "Exam configurations for the year", body = Vec<ExamConfig>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Exam Configs"
)]
#[instrument(skip(state))]
pub async fn get_exam_configs(
    State(state): State<AppState>,
    Query(params): Query<ExamConfigQuery>,
) -> Result<Json<Vec<ExamConfig>>, AppError> {
    let configs = ExamConfigService::list_by_year(&state, &params.academic_year).await?;
    Ok(Json(configs))
}
