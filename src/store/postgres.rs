//! PostgreSQL implementations of the store traits.
//!
//! Queries are runtime-checked (`sqlx::query_as`) so the crate builds
//! without a live database. `replace_for_key` and `save_all` run inside a
//! single transaction, which gives bulk entry its atomic
//! delete-then-insert and makes the rank rewrite one batched write.

use async_trait::async_trait;
use anyhow::Context;
use gradebook_models::{
    CoscholasticAssessment, ExamConfig, ExamType, Notification, Priority, ResultKey,
    StudentResult,
};
use sqlx::{PgPool, Postgres, types::Json};
use uuid::Uuid;

use super::{CoscholasticStore, ExamConfigStore, NotificationSender, ResultStore};
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct PgResultStore {
    pool: PgPool,
}

impl PgResultStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn upsert_one<'e, E>(executor: E, result: &StudentResult) -> Result<StudentResult, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, StudentResult>(
            r#"
            INSERT INTO student_results (
                id, student_id, student_name, roll_number, class_name,
                academic_year, exam_type, subject, marks_obtained, max_marks,
                percentage, grade, grade_point, is_passed, class_rank,
                teacher_remarks, is_published, entered_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            ON CONFLICT (id) DO UPDATE SET
                marks_obtained = EXCLUDED.marks_obtained,
                max_marks = EXCLUDED.max_marks,
                percentage = EXCLUDED.percentage,
                grade = EXCLUDED.grade,
                grade_point = EXCLUDED.grade_point,
                is_passed = EXCLUDED.is_passed,
                class_rank = EXCLUDED.class_rank,
                teacher_remarks = EXCLUDED.teacher_remarks,
                is_published = EXCLUDED.is_published,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(result.id)
        .bind(&result.student_id)
        .bind(&result.student_name)
        .bind(&result.roll_number)
        .bind(&result.class_name)
        .bind(&result.academic_year)
        .bind(result.exam_type)
        .bind(&result.subject)
        .bind(result.marks_obtained)
        .bind(result.max_marks)
        .bind(result.percentage)
        .bind(result.grade)
        .bind(result.grade_point)
        .bind(result.is_passed)
        .bind(result.class_rank)
        .bind(&result.teacher_remarks)
        .bind(result.is_published)
        .bind(&result.entered_by)
        .bind(result.created_at)
        .bind(result.updated_at)
        .fetch_one(executor)
        .await
    }
}

#[async_trait]
impl ResultStore for PgResultStore {
    async fn find_by_student(&self, student_id: &str) -> Result<Vec<StudentResult>, AppError> {
        sqlx::query_as::<_, StudentResult>(
            "SELECT * FROM student_results WHERE student_id = $1 ORDER BY academic_year, exam_type, subject",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch results by student")
        .map_err(AppError::database)
    }

    async fn find_by_student_and_year(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> Result<Vec<StudentResult>, AppError> {
        sqlx::query_as::<_, StudentResult>(
            "SELECT * FROM student_results WHERE student_id = $1 AND academic_year = $2 ORDER BY exam_type, subject",
        )
        .bind(student_id)
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch results by student and year")
        .map_err(AppError::database)
    }

    async fn find_by_class_and_year(
        &self,
        class_name: &str,
        academic_year: &str,
    ) -> Result<Vec<StudentResult>, AppError> {
        sqlx::query_as::<_, StudentResult>(
            "SELECT * FROM student_results WHERE class_name = $1 AND academic_year = $2 ORDER BY exam_type, subject, class_rank",
        )
        .bind(class_name)
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch results by class and year")
        .map_err(AppError::database)
    }

    async fn find_by_class_year_and_exam(
        &self,
        class_name: &str,
        academic_year: &str,
        exam_type: ExamType,
    ) -> Result<Vec<StudentResult>, AppError> {
        sqlx::query_as::<_, StudentResult>(
            "SELECT * FROM student_results WHERE class_name = $1 AND academic_year = $2 AND exam_type = $3 ORDER BY subject, class_rank",
        )
        .bind(class_name)
        .bind(academic_year)
        .bind(exam_type)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch results by class, year, and exam")
        .map_err(AppError::database)
    }

    async fn find_by_key(&self, key: &ResultKey) -> Result<Vec<StudentResult>, AppError> {
        sqlx::query_as::<_, StudentResult>(
            r#"
            SELECT * FROM student_results
            WHERE class_name = $1 AND academic_year = $2 AND exam_type = $3 AND subject = $4
            ORDER BY class_rank, roll_number
            "#,
        )
        .bind(&key.class_name)
        .bind(&key.academic_year)
        .bind(key.exam_type)
        .bind(&key.subject)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch results by key")
        .map_err(AppError::database)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StudentResult>, AppError> {
        sqlx::query_as::<_, StudentResult>("SELECT * FROM student_results WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch result by ID")
            .map_err(AppError::database)
    }

    async fn save_all(
        &self,
        results: Vec<StudentResult>,
    ) -> Result<Vec<StudentResult>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to open transaction")
            .map_err(AppError::database)?;

        let mut saved = Vec::with_capacity(results.len());
        for result in &results {
            let row = Self::upsert_one(&mut *tx, result)
                .await
                .context("Failed to upsert result")
                .map_err(AppError::database)?;
            saved.push(row);
        }

        tx.commit()
            .await
            .context("Failed to commit result batch")
            .map_err(AppError::database)?;

        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM student_results WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete result")
            .map_err(AppError::database)?;
        Ok(())
    }

    async fn replace_for_key(
        &self,
        key: &ResultKey,
        results: Vec<StudentResult>,
    ) -> Result<Vec<StudentResult>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to open transaction")
            .map_err(AppError::database)?;

        sqlx::query(
            r#"
            DELETE FROM student_results
            WHERE class_name = $1 AND academic_year = $2 AND exam_type = $3 AND subject = $4
            "#,
        )
        .bind(&key.class_name)
        .bind(&key.academic_year)
        .bind(key.exam_type)
        .bind(&key.subject)
        .execute(&mut *tx)
        .await
        .context("Failed to clear results for key")
        .map_err(AppError::database)?;

        let mut inserted = Vec::with_capacity(results.len());
        for result in &results {
            let row = Self::upsert_one(&mut *tx, result)
                .await
                .context("Failed to insert replacement result")
                .map_err(AppError::database)?;
            inserted.push(row);
        }

        tx.commit()
            .await
            .context("Failed to commit key replacement")
            .map_err(AppError::database)?;

        Ok(inserted)
    }
}

#[derive(Clone)]
pub struct PgExamConfigStore {
    pool: PgPool,
}

impl PgExamConfigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExamConfigStore for PgExamConfigStore {
    async fn find_active_by_year(
        &self,
        academic_year: &str,
    ) -> Result<Vec<ExamConfig>, AppError> {
        sqlx::query_as::<_, ExamConfig>(
            "SELECT * FROM exam_configs WHERE academic_year = $1 AND is_active = TRUE ORDER BY exam_type",
        )
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch active exam configs")
        .map_err(AppError::database)
    }

    async fn find_by_year(&self, academic_year: &str) -> Result<Vec<ExamConfig>, AppError> {
        sqlx::query_as::<_, ExamConfig>(
            "SELECT * FROM exam_configs WHERE academic_year = $1 ORDER BY exam_type",
        )
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch exam configs")
        .map_err(AppError::database)
    }

    async fn save(&self, config: ExamConfig) -> Result<ExamConfig, AppError> {
        sqlx::query_as::<_, ExamConfig>(
            r#"
            INSERT INTO exam_configs (
                id, academic_year, exam_type, display_name,
                weightage_percent, max_marks_default, is_active, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (academic_year, exam_type) DO UPDATE SET
                display_name = EXCLUDED.display_name,
                weightage_percent = EXCLUDED.weightage_percent,
                max_marks_default = EXCLUDED.max_marks_default,
                is_active = EXCLUDED.is_active
            RETURNING *
            "#,
        )
        .bind(config.id)
        .bind(&config.academic_year)
        .bind(config.exam_type)
        .bind(&config.display_name)
        .bind(config.weightage_percent)
        .bind(config.max_marks_default)
        .bind(config.is_active)
        .bind(config.created_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to save exam config")
        .map_err(AppError::database)
    }
}

#[derive(Clone)]
pub struct PgCoscholasticStore {
    pool: PgPool,
}

impl PgCoscholasticStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CoscholasticStore for PgCoscholasticStore {
    async fn find_by_student_and_year(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> Result<Vec<CoscholasticAssessment>, AppError> {
        sqlx::query_as::<_, CoscholasticAssessment>(
            "SELECT * FROM coscholastic_assessments WHERE student_id = $1 AND academic_year = $2 ORDER BY term",
        )
        .bind(student_id)
        .bind(academic_year)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch coscholastic assessments")
        .map_err(AppError::database)
    }

    async fn upsert(
        &self,
        assessment: CoscholasticAssessment,
    ) -> Result<CoscholasticAssessment, AppError> {
        sqlx::query_as::<_, CoscholasticAssessment>(
            r#"
            INSERT INTO coscholastic_assessments (
                id, student_id, student_name, class_name, academic_year,
                term, areas, entered_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (student_id, academic_year, term) DO UPDATE SET
                student_name = EXCLUDED.student_name,
                class_name = EXCLUDED.class_name,
                areas = EXCLUDED.areas,
                entered_by = EXCLUDED.entered_by
            RETURNING *
            "#,
        )
        .bind(assessment.id)
        .bind(&assessment.student_id)
        .bind(&assessment.student_name)
        .bind(&assessment.class_name)
        .bind(&assessment.academic_year)
        .bind(assessment.term)
        .bind(Json(&assessment.areas))
        .bind(&assessment.entered_by)
        .bind(assessment.created_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to upsert coscholastic assessment")
        .map_err(AppError::database)
    }
}

#[derive(Clone)]
pub struct PgNotificationSender {
    pool: PgPool,
}

impl PgNotificationSender {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationSender for PgNotificationSender {
    async fn send(
        &self,
        title: &str,
        message: &str,
        target_class: &str,
        priority: Priority,
    ) -> Result<(), AppError> {
        let notification = Notification::exam_for_class(title, message, target_class, priority);
        sqlx::query(
            r#"
            INSERT INTO notifications (id, title, message, notification_type, target_audience, target_class, priority, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.notification_type)
        .bind(&notification.target_audience)
        .bind(&notification.target_class)
        .bind(notification.priority)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to enqueue notification")
        .map_err(AppError::database)?;
        Ok(())
    }
}
