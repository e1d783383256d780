//! Exam calendar types and exam weightage configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// One sitting in a year's assessment calendar.
///
/// The derived `Ord` is the canonical calendar order and drives both
/// report-card ordering and "previous exam" lookups. Keeping this a closed
/// enum (instead of free-form strings compared against a list) means a
/// misspelled or unknown exam type is rejected at the serde/sqlx boundary
/// rather than silently sorting into the wrong place.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "exam_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamType {
    // rename_all would drop the underscore before the digit
    #[serde(rename = "UNIT_TEST_1")]
    #[sqlx(rename = "UNIT_TEST_1")]
    UnitTest1,
    #[serde(rename = "UNIT_TEST_2")]
    #[sqlx(rename = "UNIT_TEST_2")]
    UnitTest2,
    MidTerm,
    HalfYearly,
    Annual,
    PreBoard,
}

impl ExamType {
    /// Every exam type in canonical calendar order.
    pub const SEQUENCE: [ExamType; 6] = [
        ExamType::UnitTest1,
        ExamType::UnitTest2,
        ExamType::MidTerm,
        ExamType::HalfYearly,
        ExamType::Annual,
        ExamType::PreBoard,
    ];

    /// The sitting immediately before this one, `None` for the first.
    pub fn previous(self) -> Option<ExamType> {
        let position = Self::SEQUENCE.iter().position(|e| *e == self)?;
        position.checked_sub(1).map(|p| Self::SEQUENCE[p])
    }

    /// Human-readable label for notifications and display names.
    pub fn display_name(self) -> &'static str {
        match self {
            ExamType::UnitTest1 => "Unit Test 1",
            ExamType::UnitTest2 => "Unit Test 2",
            ExamType::MidTerm => "Mid Term",
            ExamType::HalfYearly => "Half Yearly",
            ExamType::Annual => "Annual",
            ExamType::PreBoard => "Pre Board",
        }
    }
}

/// Per-academic-year exam configuration.
///
/// Defines the weightage (%) each exam type contributes to the yearly
/// cumulative grade. All active configs for a year should sum to 100;
/// that is the caller's responsibility and is not enforced here.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ExamConfig {
    pub id: Uuid,
    pub academic_year: String,
    pub exam_type: ExamType,
    pub display_name: String,
    /// 0–100.
    pub weightage_percent: i32,
    /// Default max marks for this exam type.
    pub max_marks_default: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating an exam configuration.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateExamConfigDto {
    #[validate(length(min = 1, max = 20))]
    pub academic_year: String,
    pub exam_type: ExamType,
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    #[validate(range(min = 0, max = 100))]
    pub weightage_percent: i32,
    pub max_marks_default: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Query parameters for listing exam configurations.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ExamConfigQuery {
    pub academic_year: String,
}
