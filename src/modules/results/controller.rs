use crate::modules::results::analytics::AnalyticsService;
use crate::modules::results::model::{
    AnalyticsQuery, BulkResultRequest, ClassAnalytics, ClassResultsQuery, PublishRequest,
    PublishSummary, ReportCard, StudentResult, StudentResultsQuery, UpdateResultDto,
};
use crate::modules::results::report_card::ReportCardService;
use crate::modules::results::service::ResultService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[utoipa::path(
    post,
    path = "/api/results/bulk",
    request_body = BulkResultRequest,
    responses(
        (status = 200, description = "Results stored, graded, and ranked", body = Vec<StudentResult>),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Results"
)]
#[instrument(skip(state, req))]
pub async fn bulk_enter_results(
    State(state): State<AppState>,
    Json(req): Json<BulkResultRequest>,
) -> Result<Json<Vec<StudentResult>>, AppError> {
    req.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let results = ResultService::bulk_enter(&state, req).await?;
    Ok(Json(results))
}

#[utoipa::path(
    get,
    path = "/api/results/class/{class_name}/year/{academic_year}",
    params(
        ("class_name" = String, Path, description = "Class name, e.g. Class 10 - A"),
        ("academic_year" = String, Path, description = "Academic year, e.g. 2024-25"),
        ClassResultsQuery
    ),
    responses(
        (status = 200, description = "Class result sheet", body = Vec<StudentResult>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn get_class_results(
    State(state): State<AppState>,
    Path((class_name, academic_year)): Path<(String, String)>,
    Query(params): Query<ClassResultsQuery>,
) -> Result<Json<Vec<StudentResult>>, AppError> {
    let results = ResultService::class_sheet(
        &state,
        &class_name,
        &academic_year,
        params.exam_type,
        params.subject.as_deref(),
    )
    .await?;
    Ok(Json(results))
}

#[utoipa::path(
    get,
    path = "/api/results/student/{student_id}",
    params(
        ("student_id" = String, Path, description = "Student identifier"),
        StudentResultsQuery
    ),
    responses(
        (status = 200, description = "Student's result records", body = Vec<StudentResult>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn get_student_results(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Query(params): Query<StudentResultsQuery>,
) -> Result<Json<Vec<StudentResult>>, AppError> {
    let results =
        ResultService::student_results(&state, &student_id, params.academic_year.as_deref())
            .await?;
    Ok(Json(results))
}

#[utoipa::path(
    put,
    path = "/api/results/{id}",
    params(
        ("id" = Uuid, Path, description = "Result record id")
    ),
    request_body = UpdateResultDto,
    responses(
        (status = 200, description = "Result updated and group reranked", body = StudentResult),
        (status = 404, description = "Result not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Results"
)]
#[instrument(skip(state, dto))]
pub async fn update_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateResultDto>,
) -> Result<Json<StudentResult>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let result = ResultService::update_result(&state, id, dto).await?;
    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/api/results/{id}",
    params(
        ("id" = Uuid, Path, description = "Result record id")
    ),
    responses(
        (status = 200, description = "Result deleted and group reranked"),
        (status = 404, description = "Result not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn delete_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    ResultService::delete_result(&state, id).await?;
    Ok(Json(json!({ "message": "Result deleted successfully" })))
}

#[utoipa::path(
    post,
    path = "/api/results/publish",
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Draft results published and class notified", body = PublishSummary),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Results"
)]
#[instrument(skip(state, req))]
pub async fn publish_results(
    State(state): State<AppState>,
    Json(req): Json<PublishRequest>,
) -> Result<Json<PublishSummary>, AppError> {
    req.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let summary = ResultService::publish(&state, req).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/results/report-card/{student_id}/year/{academic_year}",
    params(
        ("student_id" = String, Path, description = "Student identifier"),
        ("academic_year" = String, Path, description = "Academic year, e.g. 2024-25")
    ),
    responses(
        (status = 200, description = "Consolidated report card", body = ReportCard),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn get_report_card(
    State(state): State<AppState>,
    Path((student_id, academic_year)): Path<(String, String)>,
) -> Result<Json<ReportCard>, AppError> {
    let card = ReportCardService::build(&state, &student_id, &academic_year).await?;
    Ok(Json(card))
}

#[utoipa::path(
    get,
    path = "/api/results/analytics/class/{class_name}/year/{academic_year}",
    params(
        ("class_name" = String, Path, description = "Class name, e.g. Class 10 - A"),
        ("academic_year" = String, Path, description = "Academic year, e.g. 2024-25"),
        AnalyticsQuery
    ),
    responses(
        (status = 200, description = "Class analytics", body = ClassAnalytics),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn get_class_analytics(
    State(state): State<AppState>,
    Path((class_name, academic_year)): Path<(String, String)>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<ClassAnalytics>, AppError> {
    let analytics =
        AnalyticsService::build(&state, &class_name, &academic_year, params.exam_type).await?;
    Ok(Json(analytics))
}
