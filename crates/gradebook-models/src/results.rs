//! Result records and the request/response DTOs of the results module.

use chrono::{DateTime, Utc};
use gradebook_core::Grade;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::exams::ExamType;

/// Normalised result record — one row per student, per exam, per subject.
///
/// `percentage`, `grade`, `grade_point`, and `is_passed` are derived from
/// `marks_obtained`/`max_marks` by the grade calculator and are never
/// accepted from external input. `class_rank` is rewritten by the rank
/// engine whenever any record in its (class, year, exam, subject) group
/// changes. `is_published` only ever moves false → true.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentResult {
    pub id: Uuid,

    // Student info (denormalised for fast queries)
    pub student_id: String,
    pub student_name: String,
    pub roll_number: String,
    /// e.g. "Class 10 - A"
    pub class_name: String,

    // Exam info
    /// e.g. "2024-25"
    pub academic_year: String,
    pub exam_type: ExamType,
    pub subject: String,

    // Marks
    pub marks_obtained: f64,
    pub max_marks: f64,

    // Derived
    pub percentage: f64,
    pub grade: Grade,
    pub grade_point: f64,
    pub is_passed: bool,
    /// Rank in class for this exam + subject (competition ranking).
    pub class_rank: i32,

    pub teacher_remarks: Option<String>,

    // Workflow
    pub is_published: bool,
    pub entered_by: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentResult {
    /// The replace/rank group this record belongs to.
    pub fn key(&self) -> ResultKey {
        ResultKey {
            class_name: self.class_name.clone(),
            academic_year: self.academic_year.clone(),
            exam_type: self.exam_type,
            subject: self.subject.clone(),
        }
    }
}

/// The (class, academic year, exam type, subject) key that scopes bulk
/// replacement and rank recomputation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResultKey {
    pub class_name: String,
    pub academic_year: String,
    pub exam_type: ExamType,
    pub subject: String,
}

impl ResultKey {
    /// Stable string form, used to scope the per-key entry lock.
    pub fn lock_key(&self) -> String {
        format!(
            "{}|{}|{:?}|{}",
            self.class_name, self.academic_year, self.exam_type, self.subject
        )
    }
}

/// Payload for bulk marks entry — marks for an entire class for one exam
/// type and one subject in a single call. Existing records for the key are
/// replaced wholesale, so resubmitting corrected marks is idempotent.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct BulkResultRequest {
    #[validate(length(min = 1, max = 100))]
    pub class_name: String,
    pub exam_type: ExamType,
    #[validate(length(min = 1, max = 20))]
    pub academic_year: String,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    /// Applied uniformly to every entry in the batch.
    pub max_marks: f64,
    #[validate(length(min = 1, max = 100))]
    pub entered_by: String,
    /// One entry per student in the class.
    #[validate(length(min = 1), nested)]
    pub entries: Vec<BulkStudentEntry>,
}

/// One student's marks within a bulk entry batch.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct BulkStudentEntry {
    #[validate(length(min = 1, max = 100))]
    pub student_id: String,
    #[validate(length(min = 1, max = 200))]
    pub student_name: String,
    #[validate(length(min = 1, max = 50))]
    pub roll_number: String,
    #[validate(range(min = 0.0))]
    pub marks_obtained: f64,
    pub teacher_remarks: Option<String>,
}

/// DTO for correcting a single result record. Key fields (class, year,
/// exam, subject, student) are immutable; re-entry through the bulk
/// endpoint is the way to move a record between groups.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateResultDto {
    #[validate(range(min = 0.0))]
    pub marks_obtained: Option<f64>,
    pub max_marks: Option<f64>,
    #[validate(length(max = 500))]
    pub teacher_remarks: Option<String>,
}

/// Request to publish all draft results for a (class, year, exam) key.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PublishRequest {
    #[validate(length(min = 1, max = 100))]
    pub class_name: String,
    pub exam_type: ExamType,
    #[validate(length(min = 1, max = 20))]
    pub academic_year: String,
}

/// Counts returned by the publish workflow. `published` is the number of
/// records flipped by this invocation; a repeat run reports 0.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublishSummary {
    pub total: usize,
    pub published: usize,
}

/// Query parameters for the class result sheet.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ClassResultsQuery {
    pub exam_type: Option<ExamType>,
    pub subject: Option<String>,
}

/// Query parameters for a student's results.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentResultsQuery {
    pub academic_year: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(student_id: &str, marks: f64) -> BulkStudentEntry {
        BulkStudentEntry {
            student_id: student_id.to_string(),
            student_name: "Alice".to_string(),
            roll_number: "01".to_string(),
            marks_obtained: marks,
            teacher_remarks: None,
        }
    }

    fn request(entries: Vec<BulkStudentEntry>) -> BulkResultRequest {
        BulkResultRequest {
            class_name: "Class 10 - A".to_string(),
            exam_type: ExamType::UnitTest1,
            academic_year: "2024-25".to_string(),
            subject: "Mathematics".to_string(),
            max_marks: 100.0,
            entered_by: "teacher-01".to_string(),
            entries,
        }
    }

    #[test]
    fn bulk_request_validates_nested_entries() {
        use validator::Validate;

        assert!(request(vec![entry("S001", 80.0)]).validate().is_ok());
        assert!(request(Vec::new()).validate().is_err());
        // Empty student id fails through the nested validation.
        assert!(request(vec![entry("", 80.0)]).validate().is_err());
        assert!(request(vec![entry("S001", -1.0)]).validate().is_err());
    }
}
