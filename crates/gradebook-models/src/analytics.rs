//! Class analytics response aggregate: summary statistics, subject
//! difficulty heatmap, at-risk detection, and the recognition board.
//! Rebuilt from the stored result records on every request.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::exams::ExamType;

/// Performance band for a subject's class average.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Performance {
    Excellent,
    Good,
    Average,
    Weak,
}

impl Performance {
    /// Bands on the subject's class average, not individual scores.
    pub fn for_class_average(average: f64) -> Self {
        if average >= 85.0 {
            Performance::Excellent
        } else if average >= 70.0 {
            Performance::Good
        } else if average >= 50.0 {
            Performance::Average
        } else {
            Performance::Weak
        }
    }
}

/// Risk classification for an at-risk student.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// At least one failed subject.
    Critical,
    /// Dropping subjects or a low overall average, but nothing failed.
    Warning,
}

/// Recognition board category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecognitionCategory {
    ClassTopper,
    MostImproved,
    MostConsistent,
}

/// Per-subject entry in the difficulty heatmap.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectAnalysis {
    pub subject: String,
    pub class_average: f64,
    pub pass_percentage: f64,
    pub performance: Performance,
    pub total_students: usize,
}

/// A student flagged by at-risk detection.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AtRiskStudent {
    pub student_id: String,
    pub student_name: String,
    pub roll_number: String,
    pub failed_subjects: Vec<String>,
    /// Subjects that dropped more than 15 percentage points versus the
    /// previous exam in the calendar.
    pub dropping_subjects: Vec<String>,
    pub overall_percentage: f64,
    pub risk_level: RiskLevel,
}

/// One recognition board entry.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RecognitionEntry {
    pub category: RecognitionCategory,
    pub student_name: String,
    /// e.g. "98.40%", "+12.50% improvement", "std dev 1.25"
    pub detail: String,
}

/// Analytics for one class and academic year, optionally narrowed to a
/// single exam type.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassAnalytics {
    pub class_name: String,
    pub academic_year: String,
    pub exam_type: Option<ExamType>,

    pub total_students: usize,
    pub class_average: f64,
    pub highest_percentage: f64,
    pub lowest_percentage: f64,
    /// Students with every matched subject passed / distinct students.
    pub pass_percentage: f64,

    pub subject_heatmap: Vec<SubjectAnalysis>,
    /// Sorted ascending by overall average — worst first.
    pub at_risk_students: Vec<AtRiskStudent>,
    pub recognition: Vec<RecognitionEntry>,
}

impl ClassAnalytics {
    /// The well-formed zero object returned when a class/year has no
    /// result records — "no data yet" is a normal state, not an error.
    pub fn empty(class_name: String, academic_year: String, exam_type: Option<ExamType>) -> Self {
        Self {
            class_name,
            academic_year,
            exam_type,
            total_students: 0,
            class_average: 0.0,
            highest_percentage: 0.0,
            lowest_percentage: 0.0,
            pass_percentage: 0.0,
            subject_heatmap: Vec::new(),
            at_risk_students: Vec::new(),
            recognition: Vec::new(),
        }
    }
}

/// Query parameters for class analytics.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AnalyticsQuery {
    pub exam_type: Option<ExamType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn performance_bands() {
        assert_eq!(Performance::for_class_average(85.0), Performance::Excellent);
        assert_eq!(Performance::for_class_average(84.99), Performance::Good);
        assert_eq!(Performance::for_class_average(70.0), Performance::Good);
        assert_eq!(Performance::for_class_average(69.9), Performance::Average);
        assert_eq!(Performance::for_class_average(50.0), Performance::Average);
        assert_eq!(Performance::for_class_average(49.99), Performance::Weak);
    }
}
