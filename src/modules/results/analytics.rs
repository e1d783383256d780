//! Class analytics builder.
//!
//! Aggregates one class/year (optionally one exam) into summary stats, a
//! subject difficulty heatmap, an at-risk list, and the recognition board.
//! All grouping happens over explicit typed intermediates rather than ad
//! hoc documents, and the previous exam's records are fetched once for the
//! whole class, not per student.

use std::collections::{BTreeMap, HashMap};

use gradebook_core::{mean, population_std_dev, population_variance, round2};
use gradebook_models::{
    AtRiskStudent, ClassAnalytics, ExamType, Performance, RecognitionCategory, RecognitionEntry,
    RiskLevel, StudentResult, SubjectAnalysis,
};
use tracing::instrument;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// A subject dropping more than this many percentage points versus the
/// previous exam flags its student.
const DROP_THRESHOLD: f64 = 15.0;

/// Overall average below this flags a student even with nothing failed.
const LOW_AVERAGE_THRESHOLD: f64 = 50.0;

/// Per-student rollup of the matched records.
struct StudentAggregate {
    student_id: String,
    student_name: String,
    roll_number: String,
    percentages: Vec<f64>,
    /// (subject, percentage) pairs, for previous-exam comparison.
    subjects: Vec<(String, f64)>,
    failed_subjects: Vec<String>,
    all_passed: bool,
}

impl StudentAggregate {
    fn average(&self) -> f64 {
        mean(&self.percentages)
    }
}

/// Previous-exam lookups, built once per request.
struct PreviousExam {
    /// student → subject → percentage.
    by_student_subject: HashMap<String, HashMap<String, f64>>,
    /// student → average percentage.
    average_by_student: HashMap<String, f64>,
}

pub struct AnalyticsService;

impl AnalyticsService {
    /// Builds analytics for one class and year. With `exam_type` omitted
    /// the aggregation spans every exam recorded for the year and the
    /// previous-exam comparisons (dropping subjects, most-improved) are
    /// skipped. A class with no records gets the zero-valued object.
    #[instrument(skip(state))]
    pub async fn build(
        state: &AppState,
        class_name: &str,
        academic_year: &str,
        exam_type: Option<ExamType>,
    ) -> Result<ClassAnalytics, AppError> {
        let records = match exam_type {
            Some(exam) => {
                state
                    .results
                    .find_by_class_year_and_exam(class_name, academic_year, exam)
                    .await?
            }
            None => {
                state
                    .results
                    .find_by_class_and_year(class_name, academic_year)
                    .await?
            }
        };

        if records.is_empty() {
            return Ok(ClassAnalytics::empty(
                class_name.to_string(),
                academic_year.to_string(),
                exam_type,
            ));
        }

        let students = Self::student_aggregates(&records);

        let averages: Vec<f64> = students.values().map(|s| s.average()).collect();
        let class_average = round2(mean(&averages));
        let highest_percentage = round2(averages.iter().copied().fold(f64::MIN, f64::max));
        let lowest_percentage = round2(averages.iter().copied().fold(f64::MAX, f64::min));
        let fully_passed = students.values().filter(|s| s.all_passed).count();
        let pass_percentage = round2(fully_passed as f64 / students.len() as f64 * 100.0);

        let previous = match exam_type.and_then(ExamType::previous) {
            Some(previous_exam) => {
                let previous_records = state
                    .results
                    .find_by_class_year_and_exam(class_name, academic_year, previous_exam)
                    .await?;
                if previous_records.is_empty() {
                    None
                } else {
                    Some(Self::previous_lookup(&previous_records))
                }
            }
            None => None,
        };

        Ok(ClassAnalytics {
            class_name: class_name.to_string(),
            academic_year: academic_year.to_string(),
            exam_type,
            total_students: students.len(),
            class_average,
            highest_percentage,
            lowest_percentage,
            pass_percentage,
            subject_heatmap: Self::subject_heatmap(&records),
            at_risk_students: Self::at_risk(&students, previous.as_ref()),
            recognition: Self::recognition(&students, previous.as_ref()),
        })
    }

    /// Groups records per student; BTreeMap keying keeps every downstream
    /// iteration deterministic regardless of store iteration order.
    fn student_aggregates(records: &[StudentResult]) -> BTreeMap<String, StudentAggregate> {
        let mut students: BTreeMap<String, StudentAggregate> = BTreeMap::new();
        for record in records {
            let aggregate = students
                .entry(record.student_id.clone())
                .or_insert_with(|| StudentAggregate {
                    student_id: record.student_id.clone(),
                    student_name: record.student_name.clone(),
                    roll_number: record.roll_number.clone(),
                    percentages: Vec::new(),
                    subjects: Vec::new(),
                    failed_subjects: Vec::new(),
                    all_passed: true,
                });
            aggregate.percentages.push(record.percentage);
            aggregate
                .subjects
                .push((record.subject.clone(), record.percentage));
            if !record.is_passed {
                aggregate.all_passed = false;
                if !aggregate.failed_subjects.contains(&record.subject) {
                    aggregate.failed_subjects.push(record.subject.clone());
                }
            }
        }
        students
    }

    fn previous_lookup(previous_records: &[StudentResult]) -> PreviousExam {
        let mut by_student_subject: HashMap<String, HashMap<String, f64>> = HashMap::new();
        let mut percentages_by_student: HashMap<String, Vec<f64>> = HashMap::new();
        for record in previous_records {
            by_student_subject
                .entry(record.student_id.clone())
                .or_default()
                .insert(record.subject.clone(), record.percentage);
            percentages_by_student
                .entry(record.student_id.clone())
                .or_default()
                .push(record.percentage);
        }
        let average_by_student = percentages_by_student
            .into_iter()
            .map(|(student_id, percentages)| (student_id, mean(&percentages)))
            .collect();
        PreviousExam {
            by_student_subject,
            average_by_student,
        }
    }

    /// Per-subject class average, pass rate, and performance band.
    fn subject_heatmap(records: &[StudentResult]) -> Vec<SubjectAnalysis> {
        let mut by_subject: BTreeMap<&str, Vec<&StudentResult>> = BTreeMap::new();
        for record in records {
            by_subject.entry(&record.subject).or_default().push(record);
        }

        by_subject
            .into_iter()
            .map(|(subject, subject_records)| {
                let percentages: Vec<f64> =
                    subject_records.iter().map(|r| r.percentage).collect();
                let passed = subject_records.iter().filter(|r| r.is_passed).count();
                let class_average = round2(mean(&percentages));
                SubjectAnalysis {
                    subject: subject.to_string(),
                    class_average,
                    pass_percentage: round2(
                        passed as f64 / subject_records.len() as f64 * 100.0,
                    ),
                    performance: Performance::for_class_average(class_average),
                    total_students: subject_records.len(),
                }
            })
            .collect()
    }

    /// Flags students with a failed subject, a >15-point subject drop
    /// versus the previous exam, or an overall average below 50. Any
    /// failed subject makes the risk CRITICAL; otherwise WARNING. Sorted
    /// worst average first.
    fn at_risk(
        students: &BTreeMap<String, StudentAggregate>,
        previous: Option<&PreviousExam>,
    ) -> Vec<AtRiskStudent> {
        let mut flagged = Vec::new();
        for student in students.values() {
            let dropping_subjects: Vec<String> = match previous {
                Some(previous) => {
                    let previous_subjects =
                        previous.by_student_subject.get(&student.student_id);
                    student
                        .subjects
                        .iter()
                        .filter(|(subject, percentage)| {
                            previous_subjects
                                .and_then(|subjects| subjects.get(subject))
                                .is_some_and(|prev| prev - percentage > DROP_THRESHOLD)
                        })
                        .map(|(subject, _)| subject.clone())
                        .collect()
                }
                None => Vec::new(),
            };

            let average = student.average();
            if student.failed_subjects.is_empty()
                && dropping_subjects.is_empty()
                && average >= LOW_AVERAGE_THRESHOLD
            {
                continue;
            }

            flagged.push(AtRiskStudent {
                student_id: student.student_id.clone(),
                student_name: student.student_name.clone(),
                roll_number: student.roll_number.clone(),
                failed_subjects: student.failed_subjects.clone(),
                dropping_subjects,
                overall_percentage: round2(average),
                risk_level: if student.failed_subjects.is_empty() {
                    RiskLevel::Warning
                } else {
                    RiskLevel::Critical
                },
            });
        }

        flagged.sort_by(|a, b| {
            a.overall_percentage
                .total_cmp(&b.overall_percentage)
                .then_with(|| a.student_id.cmp(&b.student_id))
        });
        flagged
    }

    /// Topper, most-improved, most-consistent. Ties are broken by
    /// lexicographically smallest student id so the board is stable
    /// across store backends.
    fn recognition(
        students: &BTreeMap<String, StudentAggregate>,
        previous: Option<&PreviousExam>,
    ) -> Vec<RecognitionEntry> {
        let mut board = Vec::new();

        let topper = students.values().max_by(|a, b| {
            a.average()
                .total_cmp(&b.average())
                .then_with(|| b.student_id.cmp(&a.student_id))
        });
        if let Some(topper) = topper {
            board.push(RecognitionEntry {
                category: RecognitionCategory::ClassTopper,
                student_name: topper.student_name.clone(),
                detail: format!("{:.2}%", round2(topper.average())),
            });
        }

        if let Some(previous) = previous {
            let most_improved = students
                .values()
                .filter_map(|student| {
                    previous
                        .average_by_student
                        .get(&student.student_id)
                        .map(|prev| (student, student.average() - prev))
                })
                .filter(|(_, delta)| *delta > 0.0)
                .max_by(|a, b| {
                    a.1.total_cmp(&b.1)
                        .then_with(|| b.0.student_id.cmp(&a.0.student_id))
                });
            if let Some((student, delta)) = most_improved {
                board.push(RecognitionEntry {
                    category: RecognitionCategory::MostImproved,
                    student_name: student.student_name.clone(),
                    detail: format!("+{:.2}% improvement", round2(delta)),
                });
            }
        }

        let most_consistent = students
            .values()
            .filter(|s| s.percentages.len() >= 2)
            .min_by(|a, b| {
                population_variance(&a.percentages)
                    .total_cmp(&population_variance(&b.percentages))
                    .then_with(|| a.student_id.cmp(&b.student_id))
            });
        if let Some(student) = most_consistent {
            board.push(RecognitionEntry {
                category: RecognitionCategory::MostConsistent,
                student_name: student.student_name.clone(),
                detail: format!("std dev {:.2}", population_std_dev(&student.percentages)),
            });
        }

        board
    }
}
