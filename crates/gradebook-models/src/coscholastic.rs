//! Co-scholastic assessments — non-academic areas (art, sports, life
//! skills, values, health) graded on an A–D band, separate from subject
//! marks. Appended read-only to report cards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Assessment term within an academic year.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "term", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Term {
    // rename_all would drop the underscore before the digit
    #[serde(rename = "TERM_1")]
    #[sqlx(rename = "TERM_1")]
    Term1,
    #[serde(rename = "TERM_2")]
    #[sqlx(rename = "TERM_2")]
    Term2,
}

/// A–D band used for co-scholastic areas (A = Outstanding … D = Needs
/// Improvement). Distinct from the ten-point subject grade scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AreaGrade {
    A,
    B,
    C,
    D,
}

/// One assessed area within a term.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct CoscholasticArea {
    /// e.g. "Art Education", "Sports & Games", "Life Skills"
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub grade: AreaGrade,
    pub remarks: Option<String>,
}

/// Co-scholastic assessment — one row per (student, academic year, term).
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CoscholasticAssessment {
    pub id: Uuid,
    pub student_id: String,
    pub student_name: String,
    pub class_name: String,
    pub academic_year: String,
    pub term: Term,
    #[sqlx(json)]
    pub areas: Vec<CoscholasticArea>,
    pub entered_by: String,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating or replacing a term's assessment for a student.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpsertCoscholasticDto {
    #[validate(length(min = 1, max = 100))]
    pub student_id: String,
    #[validate(length(min = 1, max = 200))]
    pub student_name: String,
    #[validate(length(min = 1, max = 100))]
    pub class_name: String,
    #[validate(length(min = 1, max = 20))]
    pub academic_year: String,
    pub term: Term,
    #[validate(length(min = 1), nested)]
    pub areas: Vec<CoscholasticArea>,
    #[validate(length(min = 1, max = 100))]
    pub entered_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_serializes_with_the_underscore() {
        assert_eq!(serde_json::to_string(&Term::Term1).unwrap(), "\"TERM_1\"");
        assert_eq!(
            serde_json::from_str::<Term>("\"TERM_2\"").unwrap(),
            Term::Term2
        );
        assert!(serde_json::from_str::<Term>("\"TERM1\"").is_err());
    }
}
