//! Report card response aggregate.
//!
//! Built on demand from the current result records plus exam weightage
//! configuration; never persisted, so it is always consistent with the
//! latest stored state.

use std::collections::BTreeMap;

use gradebook_core::Grade;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::coscholastic::CoscholasticAssessment;
use crate::exams::ExamType;

/// Direction of a subject's performance across its two most recent exams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// One exam's marks within a subject summary.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExamResultEntry {
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub percentage: f64,
    pub grade: Grade,
    pub grade_point: f64,
    pub is_passed: bool,
    pub class_rank: i32,
    pub teacher_remarks: Option<String>,
}

/// One subject's results across every exam taken, with the weighted
/// cumulative percentage and predicted grade.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectSummary {
    pub subject: String,
    /// Keyed by exam type; iteration order is the canonical calendar order.
    pub exam_results: BTreeMap<ExamType, ExamResultEntry>,
    /// Σ(percentage × weight) / Σ(weight), falling back to the plain mean
    /// when no configured weights match.
    pub weighted_percentage: f64,
    pub predicted_grade: Grade,
    pub trend: Trend,
}

/// Full report card for one student and academic year.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportCard {
    pub student_id: String,
    pub student_name: String,
    pub class_name: String,
    pub roll_number: String,
    pub academic_year: String,

    pub subjects: Vec<SubjectSummary>,

    /// Unweighted mean of the subjects' weighted percentages (equal weight
    /// per subject, not per exam).
    pub cumulative_percentage: f64,
    pub overall_grade: Grade,
    pub overall_grade_point: f64,
    /// 1 + number of classmates whose own average strictly exceeds this
    /// student's cumulative percentage; ties share a rank. 0 when the
    /// student has no records yet.
    pub class_rank: i32,

    pub coscholastic_term1: Option<CoscholasticAssessment>,
    pub coscholastic_term2: Option<CoscholasticAssessment>,
}
