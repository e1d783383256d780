//! Persistence collaborators behind store-agnostic traits.
//!
//! The engine only ever talks to these traits, so the computation and
//! consistency contract is independent of the concrete backend. The
//! production backend is PostgreSQL ([`postgres`]); an in-memory backend
//! ([`memory`], behind the `test-utils` feature) lets the integration
//! tests exercise the full stack without a database.

use async_trait::async_trait;
use gradebook_models::{
    CoscholasticAssessment, ExamConfig, ExamType, Priority, ResultKey, StudentResult,
};
use uuid::Uuid;

use crate::utils::errors::AppError;

pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

/// Result record persistence.
///
/// `replace_for_key` must make delete-then-insert appear atomic for the
/// key — a reader never observes the key half-replaced. That property is
/// required by the bulk entry contract, not incidental.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn find_by_student(&self, student_id: &str) -> Result<Vec<StudentResult>, AppError>;

    async fn find_by_student_and_year(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> Result<Vec<StudentResult>, AppError>;

    async fn find_by_class_and_year(
        &self,
        class_name: &str,
        academic_year: &str,
    ) -> Result<Vec<StudentResult>, AppError>;

    async fn find_by_class_year_and_exam(
        &self,
        class_name: &str,
        academic_year: &str,
        exam_type: ExamType,
    ) -> Result<Vec<StudentResult>, AppError>;

    async fn find_by_key(&self, key: &ResultKey) -> Result<Vec<StudentResult>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StudentResult>, AppError>;

    /// Upserts a batch of records in one write.
    async fn save_all(&self, results: Vec<StudentResult>)
    -> Result<Vec<StudentResult>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Atomically replaces every record for `key` with `results`.
    async fn replace_for_key(
        &self,
        key: &ResultKey,
        results: Vec<StudentResult>,
    ) -> Result<Vec<StudentResult>, AppError>;
}

/// Exam weightage configuration persistence.
#[async_trait]
pub trait ExamConfigStore: Send + Sync {
    /// Active configs only — the report card builder's weighting input.
    async fn find_active_by_year(&self, academic_year: &str)
    -> Result<Vec<ExamConfig>, AppError>;

    async fn find_by_year(&self, academic_year: &str) -> Result<Vec<ExamConfig>, AppError>;

    async fn save(&self, config: ExamConfig) -> Result<ExamConfig, AppError>;
}

/// Co-scholastic assessment persistence.
#[async_trait]
pub trait CoscholasticStore: Send + Sync {
    async fn find_by_student_and_year(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> Result<Vec<CoscholasticAssessment>, AppError>;

    /// Insert-or-replace keyed on (student, year, term).
    async fn upsert(
        &self,
        assessment: CoscholasticAssessment,
    ) -> Result<CoscholasticAssessment, AppError>;
}

/// Outbound notification delivery. Fire-and-forget from the engine's
/// perspective — the publish workflow does not roll back on send failure.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(
        &self,
        title: &str,
        message: &str,
        target_class: &str,
        priority: Priority,
    ) -> Result<(), AppError>;
}
