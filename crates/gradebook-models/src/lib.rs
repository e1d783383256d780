//! # Gradebook Models
//!
//! Domain models and DTOs for the Gradebook API.
//!
//! This crate provides all data structures used throughout the application:
//! stored entities, request/response DTOs, and the derived read-side
//! aggregates (report cards, class analytics).
//!
//! # Modules
//!
//! - [`exams`]: exam calendar (`ExamType`) and weightage configuration
//! - [`results`]: result records and the results module's DTOs
//! - [`coscholastic`]: co-scholastic (non-academic) assessments
//! - [`report_card`]: the report card response aggregate
//! - [`analytics`]: the class analytics response aggregate
//! - [`notifications`]: the stored notification record

pub mod analytics;
pub mod coscholastic;
pub mod exams;
pub mod notifications;
pub mod report_card;
pub mod results;

// Re-export commonly used types at crate root for convenience
pub use analytics::{
    AnalyticsQuery, AtRiskStudent, ClassAnalytics, Performance, RecognitionCategory,
    RecognitionEntry, RiskLevel, SubjectAnalysis,
};
pub use coscholastic::{
    AreaGrade, CoscholasticArea, CoscholasticAssessment, Term, UpsertCoscholasticDto,
};
pub use exams::{CreateExamConfigDto, ExamConfig, ExamConfigQuery, ExamType};
pub use notifications::{Notification, Priority};
pub use report_card::{ExamResultEntry, ReportCard, SubjectSummary, Trend};
pub use results::{
    BulkResultRequest, BulkStudentEntry, ClassResultsQuery, PublishRequest, PublishSummary,
    ResultKey, StudentResult, StudentResultsQuery, UpdateResultDto,
};
