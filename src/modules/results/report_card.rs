//! Report card builder.
//!
//! A read-side aggregator: gathers a student's subject × exam records for
//! one year, applies the configured exam weightings, and derives per-subject
//! cumulative percentages, trends, an overall weighted figure, and the
//! student's rank within the class. Nothing here is persisted; the card is
//! rebuilt from current records on every request.

use std::collections::{BTreeMap, HashMap};

use gradebook_core::{Grade, mean, round2};
use gradebook_models::{
    CoscholasticAssessment, ExamResultEntry, ExamType, ReportCard, StudentResult, SubjectSummary,
    Term, Trend,
};
use tracing::instrument;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// A subject's percentage must move by more than this many points between
/// consecutive exams to count as a trend.
const TREND_THRESHOLD: f64 = 2.0;

pub struct ReportCardService;

impl ReportCardService {
    /// Builds the full report card for one student and academic year.
    ///
    /// A student with no records gets an empty, well-formed card — "no
    /// data yet" is a normal state, not an error.
    #[instrument(skip(state))]
    pub async fn build(
        state: &AppState,
        student_id: &str,
        academic_year: &str,
    ) -> Result<ReportCard, AppError> {
        let records = state
            .results
            .find_by_student_and_year(student_id, academic_year)
            .await?;

        if records.is_empty() {
            return Ok(Self::empty_card(student_id, academic_year));
        }

        let weights = Self::weight_map(state, academic_year).await?;
        let subjects = Self::subject_summaries(&records, &weights);

        let cumulative_percentage = round2(mean(
            &subjects
                .iter()
                .map(|s| s.weighted_percentage)
                .collect::<Vec<_>>(),
        ));
        let overall_grade = Grade::from_percentage(cumulative_percentage);

        let class_rank = Self::class_rank(
            state,
            &records[0].class_name,
            academic_year,
            student_id,
            cumulative_percentage,
        )
        .await?;

        let (coscholastic_term1, coscholastic_term2) =
            Self::coscholastic_terms(state, student_id, academic_year).await?;

        Ok(ReportCard {
            student_id: records[0].student_id.clone(),
            student_name: records[0].student_name.clone(),
            class_name: records[0].class_name.clone(),
            roll_number: records[0].roll_number.clone(),
            academic_year: academic_year.to_string(),
            subjects,
            cumulative_percentage,
            overall_grade,
            overall_grade_point: overall_grade.points(),
            class_rank,
            coscholastic_term1,
            coscholastic_term2,
        })
    }

    fn empty_card(student_id: &str, academic_year: &str) -> ReportCard {
        let grade = Grade::from_percentage(0.0);
        ReportCard {
            student_id: student_id.to_string(),
            student_name: String::new(),
            class_name: String::new(),
            roll_number: String::new(),
            academic_year: academic_year.to_string(),
            subjects: Vec::new(),
            cumulative_percentage: 0.0,
            overall_grade: grade,
            overall_grade_point: grade.points(),
            class_rank: 0,
            coscholastic_term1: None,
            coscholastic_term2: None,
        }
    }

    /// Exam type → weightage percent from the year's active configs.
    /// Exam types without a config weigh 0.
    async fn weight_map(
        state: &AppState,
        academic_year: &str,
    ) -> Result<HashMap<ExamType, f64>, AppError> {
        let configs = state.exam_configs.find_active_by_year(academic_year).await?;
        Ok(configs
            .into_iter()
            .map(|c| (c.exam_type, c.weightage_percent as f64))
            .collect())
    }

    fn subject_summaries(
        records: &[StudentResult],
        weights: &HashMap<ExamType, f64>,
    ) -> Vec<SubjectSummary> {
        let mut by_subject: BTreeMap<&str, Vec<&StudentResult>> = BTreeMap::new();
        for record in records {
            by_subject.entry(&record.subject).or_default().push(record);
        }

        by_subject
            .into_iter()
            .map(|(subject, mut subject_records)| {
                // Canonical calendar order; `exam_results` keys iterate the
                // same way since BTreeMap shares ExamType's Ord.
                subject_records.sort_by_key(|r| r.exam_type);

                let exam_results: BTreeMap<ExamType, ExamResultEntry> = subject_records
                    .iter()
                    .map(|r| {
                        (
                            r.exam_type,
                            ExamResultEntry {
                                marks_obtained: r.marks_obtained,
                                max_marks: r.max_marks,
                                percentage: r.percentage,
                                grade: r.grade,
                                grade_point: r.grade_point,
                                is_passed: r.is_passed,
                                class_rank: r.class_rank,
                                teacher_remarks: r.teacher_remarks.clone(),
                            },
                        )
                    })
                    .collect();

                let weighted_percentage = Self::weighted_percentage(&subject_records, weights);
                SubjectSummary {
                    subject: subject.to_string(),
                    exam_results,
                    weighted_percentage,
                    predicted_grade: Grade::from_percentage(weighted_percentage),
                    trend: Self::trend(&subject_records),
                }
            })
            .collect()
    }

    /// Σ(percentage × weight) / Σ(weight) over the exams present for the
    /// subject. When no configured weight matches (total weight 0), falls
    /// back to the plain mean so an unconfigured year still gets a figure.
    fn weighted_percentage(
        subject_records: &[&StudentResult],
        weights: &HashMap<ExamType, f64>,
    ) -> f64 {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for record in subject_records {
            let weight = weights.get(&record.exam_type).copied().unwrap_or(0.0);
            weighted_sum += record.percentage * weight;
            total_weight += weight;
        }

        if total_weight > 0.0 {
            round2(weighted_sum / total_weight)
        } else {
            round2(mean(
                &subject_records
                    .iter()
                    .map(|r| r.percentage)
                    .collect::<Vec<_>>(),
            ))
        }
    }

    /// Latest exam versus the one before it, in calendar order. Fewer than
    /// two exams is STABLE by definition.
    fn trend(subject_records: &[&StudentResult]) -> Trend {
        if subject_records.len() < 2 {
            return Trend::Stable;
        }
        let last = subject_records[subject_records.len() - 1].percentage;
        let second_last = subject_records[subject_records.len() - 2].percentage;
        let delta = last - second_last;
        if delta > TREND_THRESHOLD {
            Trend::Improving
        } else if delta < -TREND_THRESHOLD {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }

    /// Dense rank: 1 + the number of classmates whose own plain average
    /// (across all their records, unweighted) strictly exceeds this
    /// student's cumulative percentage. Ties share a rank.
    async fn class_rank(
        state: &AppState,
        class_name: &str,
        academic_year: &str,
        student_id: &str,
        cumulative_percentage: f64,
    ) -> Result<i32, AppError> {
        let class_records = state
            .results
            .find_by_class_and_year(class_name, academic_year)
            .await?;

        let mut per_student: HashMap<&str, Vec<f64>> = HashMap::new();
        for record in &class_records {
            if record.student_id != student_id {
                per_student
                    .entry(&record.student_id)
                    .or_default()
                    .push(record.percentage);
            }
        }

        let better = per_student
            .values()
            .filter(|percentages| mean(percentages) > cumulative_percentage)
            .count();
        Ok(better as i32 + 1)
    }

    async fn coscholastic_terms(
        state: &AppState,
        student_id: &str,
        academic_year: &str,
    ) -> Result<
        (
            Option<CoscholasticAssessment>,
            Option<CoscholasticAssessment>,
        ),
        AppError,
    > {
        let assessments = state
            .coscholastic
            .find_by_student_and_year(student_id, academic_year)
            .await?;
        let term1 = assessments.iter().find(|a| a.term == Term::Term1).cloned();
        let term2 = assessments.iter().find(|a| a.term == Term::Term2).cloned();
        Ok((term1, term2))
    }
}
