//! Grade scale and percentage evaluation.
//!
//! The scale is the CBSE-style ten-point table:
//!
//! | Percentage ≥ | Grade | Points |
//! |--------------|-------|--------|
//! | 91           | A1    | 10     |
//! | 81           | A2    | 9      |
//! | 71           | B1    | 8      |
//! | 61           | B2    | 7      |
//! | 51           | C1    | 6      |
//! | 41           | C2    | 5      |
//! | 33           | D     | 4      |
//! | below 33     | E     | 0      |
//!
//! A percentage of at least 33.00 counts as a pass.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Minimum percentage required to pass a subject.
pub const PASS_MARK_PERCENT: f64 = 33.0;

/// Letter grade on the ten-point scale.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "grade")]
pub enum Grade {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    D,
    E,
}

impl Grade {
    /// Maps a (rounded) percentage onto the grade table.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 91.0 {
            Grade::A1
        } else if percentage >= 81.0 {
            Grade::A2
        } else if percentage >= 71.0 {
            Grade::B1
        } else if percentage >= 61.0 {
            Grade::B2
        } else if percentage >= 51.0 {
            Grade::C1
        } else if percentage >= 41.0 {
            Grade::C2
        } else if percentage >= 33.0 {
            Grade::D
        } else {
            Grade::E
        }
    }

    /// Grade points carried by this grade.
    pub fn points(self) -> f64 {
        match self {
            Grade::A1 => 10.0,
            Grade::A2 => 9.0,
            Grade::B1 => 8.0,
            Grade::B2 => 7.0,
            Grade::C1 => 6.0,
            Grade::C2 => 5.0,
            Grade::D => 4.0,
            Grade::E => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A1 => "A1",
            Grade::A2 => "A2",
            Grade::B1 => "B1",
            Grade::B2 => "B2",
            Grade::C1 => "C1",
            Grade::C2 => "C2",
            Grade::D => "D",
            Grade::E => "E",
        }
    }
}

/// The derived fields of one result record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marksheet {
    pub percentage: f64,
    pub grade: Grade,
    pub grade_point: f64,
    pub is_passed: bool,
}

/// Rounds half-up to two decimal places.
///
/// Marks and percentages are never negative here, so `f64::round`
/// (half away from zero) behaves as half-up. Aggregates built on top of
/// already-rounded percentages round again at their own boundary; that
/// double rounding is deliberate and relied upon by callers.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes percentage, grade, grade point, and pass flag for a score.
///
/// `max_marks <= 0` is a data error on the caller's side; the record is
/// evaluated as 0% instead of aborting the surrounding batch.
pub fn evaluate(marks_obtained: f64, max_marks: f64) -> Marksheet {
    let percentage = if max_marks <= 0.0 {
        tracing::warn!(
            marks_obtained,
            max_marks,
            "max_marks is not positive, evaluating as 0%"
        );
        0.0
    } else {
        round2(marks_obtained / max_marks * 100.0)
    };

    let grade = Grade::from_percentage(percentage);

    Marksheet {
        percentage,
        grade,
        grade_point: grade.points(),
        is_passed: percentage >= PASS_MARK_PERCENT,
    }
}
