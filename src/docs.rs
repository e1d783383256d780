use utoipa::OpenApi;

use crate::modules::results::controller::ErrorResponse;
use gradebook_core::Grade;
use gradebook_models::analytics::{
    AtRiskStudent, ClassAnalytics, Performance, RecognitionCategory, RecognitionEntry, RiskLevel,
    SubjectAnalysis,
};
use gradebook_models::coscholastic::{
    AreaGrade, CoscholasticArea, CoscholasticAssessment, Term, UpsertCoscholasticDto,
};
use gradebook_models::exams::{CreateExamConfigDto, ExamConfig, ExamType};
use gradebook_models::report_card::{ExamResultEntry, ReportCard, SubjectSummary, Trend};
use gradebook_models::results::{
    BulkResultRequest, BulkStudentEntry, PublishRequest, PublishSummary, StudentResult,
    UpdateResultDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::results::controller::bulk_enter_results,
        crate::modules::results::controller::get_class_results,
        crate::modules::results::controller::get_student_results,
        crate::modules::results::controller::update_result,
        crate::modules::results::controller::delete_result,
        crate::modules::results::controller::publish_results,
        crate::modules::results::controller::get_report_card,
        crate::modules::results::controller::get_class_analytics,
        crate::modules::exam_configs::controller::create_exam_config,
        crate::modules::exam_configs::controller::get_exam_configs,
        crate::modules::coscholastic::controller::upsert_coscholastic,
        crate::modules::coscholastic::controller::get_student_coscholastic,
    ),
    components(
        schemas(
            StudentResult,
            BulkResultRequest,
            BulkStudentEntry,
            UpdateResultDto,
            PublishRequest,
            PublishSummary,
            ExamType,
            Grade,
            ReportCard,
            SubjectSummary,
            ExamResultEntry,
            Trend,
            ClassAnalytics,
            SubjectAnalysis,
            AtRiskStudent,
            RecognitionEntry,
            Performance,
            RiskLevel,
            RecognitionCategory,
            ExamConfig,
            CreateExamConfigDto,
            CoscholasticAssessment,
            CoscholasticArea,
            UpsertCoscholasticDto,
            Term,
            AreaGrade,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Results", description = "Bulk marks entry, result sheets, report cards, analytics, and publishing"),
        (name = "Exam Configs", description = "Per-year exam weightage configuration"),
        (name = "Co-scholastic", description = "Non-academic assessment entry")
    ),
    info(
        title = "Gradebook API",
        version = "0.1.0",
        description = "Examination results and analytics engine built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
