//! Bulk entry, rank maintenance, single-record corrections, and the
//! publish workflow.
//!
//! Every mutation here keeps one invariant current: for any (class, year,
//! exam, subject) key, `class_rank` reflects competition ranking over the
//! key's full record set before the call returns.

use std::collections::HashSet;

use anyhow::anyhow;
use chrono::Utc;
use gradebook_core::{competition_ranks, grading};
use gradebook_models::{
    BulkResultRequest, ExamType, Priority, PublishRequest, PublishSummary, ResultKey,
    StudentResult, UpdateResultDto,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct ResultService;

impl ResultService {
    /// Recomputes competition ranks for one key group in place. Sorts
    /// descending by marks; equal marks share a rank.
    fn rank_group(group: &mut [StudentResult]) {
        group.sort_by(|a, b| {
            b.marks_obtained
                .total_cmp(&a.marks_obtained)
                .then_with(|| a.roll_number.cmp(&b.roll_number))
        });
        let marks: Vec<f64> = group.iter().map(|r| r.marks_obtained).collect();
        for (record, rank) in group.iter_mut().zip(competition_ranks(&marks)) {
            record.class_rank = rank;
        }
    }

    /// Replaces all results for the request's key with the submitted batch.
    ///
    /// Grades and ranks are computed on the new batch in memory, so the
    /// store's atomic `replace_for_key` is the single write for the whole
    /// operation — resubmitting corrected marks can never leave duplicates,
    /// orphans, or stale ranks behind.
    #[instrument(skip(state, req), fields(class = %req.class_name, exam = ?req.exam_type, subject = %req.subject))]
    pub async fn bulk_enter(
        state: &AppState,
        req: BulkResultRequest,
    ) -> Result<Vec<StudentResult>, AppError> {
        if req.entries.is_empty() {
            return Err(AppError::bad_request(anyhow!(
                "Bulk entry requires at least one student entry"
            )));
        }

        // One record per student per key; a duplicate in the batch would
        // silently persist twice under replace semantics.
        let mut seen = HashSet::with_capacity(req.entries.len());
        for entry in &req.entries {
            if !seen.insert(entry.student_id.as_str()) {
                return Err(AppError::bad_request(anyhow!(
                    "Duplicate student_id {} in bulk entry batch",
                    entry.student_id
                )));
            }
        }

        let key = ResultKey {
            class_name: req.class_name.clone(),
            academic_year: req.academic_year.clone(),
            exam_type: req.exam_type,
            subject: req.subject.clone(),
        };
        let _guard = state.entry_locks.acquire(&key.lock_key()).await;

        let now = Utc::now();
        let mut batch: Vec<StudentResult> = req
            .entries
            .into_iter()
            .map(|entry| {
                let sheet = grading::evaluate(entry.marks_obtained, req.max_marks);
                StudentResult {
                    id: Uuid::new_v4(),
                    student_id: entry.student_id,
                    student_name: entry.student_name,
                    roll_number: entry.roll_number,
                    class_name: req.class_name.clone(),
                    academic_year: req.academic_year.clone(),
                    exam_type: req.exam_type,
                    subject: req.subject.clone(),
                    marks_obtained: entry.marks_obtained,
                    max_marks: req.max_marks,
                    percentage: sheet.percentage,
                    grade: sheet.grade,
                    grade_point: sheet.grade_point,
                    is_passed: sheet.is_passed,
                    class_rank: 0,
                    teacher_remarks: entry.teacher_remarks,
                    is_published: false,
                    entered_by: req.entered_by.clone(),
                    created_at: now,
                    updated_at: now,
                }
            })
            .collect();

        Self::rank_group(&mut batch);
        let saved = state.results.replace_for_key(&key, batch).await?;

        info!(records = saved.len(), "Bulk result entry stored and ranked");
        Ok(saved)
    }

    /// Class result sheet, ordered by exam, subject, then rank.
    #[instrument(skip(state))]
    pub async fn class_sheet(
        state: &AppState,
        class_name: &str,
        academic_year: &str,
        exam_type: Option<ExamType>,
        subject: Option<&str>,
    ) -> Result<Vec<StudentResult>, AppError> {
        let mut results = match exam_type {
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

        if let Some(subject) = subject {
            results.retain(|r| r.subject == subject);
        }

        results.sort_by(|a, b| {
            a.exam_type
                .cmp(&b.exam_type)
                .then_with(|| a.subject.cmp(&b.subject))
                .then_with(|| a.class_rank.cmp(&b.class_rank))
                .then_with(|| a.roll_number.cmp(&b.roll_number))
        });
        Ok(results)
    }

    /// Every stored result for a student, optionally narrowed to one year.
    #[instrument(skip(state))]
    pub async fn student_results(
        state: &AppState,
        student_id: &str,
        academic_year: Option<&str>,
    ) -> Result<Vec<StudentResult>, AppError> {
        match academic_year {
            Some(year) => state.results.find_by_student_and_year(student_id, year).await,
            None => state.results.find_by_student(student_id).await,
        }
    }

    /// Corrects one record's marks or remarks, regrades it, and reranks
    /// its whole key group in one batched write.
    #[instrument(skip(state, dto))]
    pub async fn update_result(
        state: &AppState,
        id: Uuid,
        dto: UpdateResultDto,
    ) -> Result<StudentResult, AppError> {
        let existing = state
            .results
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Result not found")))?;

        let key = existing.key();
        let _guard = state.entry_locks.acquire(&key.lock_key()).await;

        // Re-read under the lock so the rewrite is based on the current group.
        let mut group = state.results.find_by_key(&key).await?;
        let record = group
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(anyhow!("Result not found")))?;

        if let Some(marks) = dto.marks_obtained {
            record.marks_obtained = marks;
        }
        if let Some(max) = dto.max_marks {
            record.max_marks = max;
        }
        if let Some(remarks) = dto.teacher_remarks {
            record.teacher_remarks = Some(remarks);
        }

        let sheet = grading::evaluate(record.marks_obtained, record.max_marks);
        record.percentage = sheet.percentage;
        record.grade = sheet.grade;
        record.grade_point = sheet.grade_point;
        record.is_passed = sheet.is_passed;
        record.updated_at = Utc::now();

        Self::rank_group(&mut group);
        let saved = state.results.save_all(group).await?;

        saved
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::internal(anyhow!("Updated result missing from saved group")))
    }

    /// Deletes one record and reranks the remainder of its group.
    #[instrument(skip(state))]
    pub async fn delete_result(state: &AppState, id: Uuid) -> Result<(), AppError> {
        let existing = state
            .results
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Result not found")))?;

        let key = existing.key();
        let _guard = state.entry_locks.acquire(&key.lock_key()).await;

        state.results.delete(id).await?;

        let mut group = state.results.find_by_key(&key).await?;
        if !group.is_empty() {
            Self::rank_group(&mut group);
            state.results.save_all(group).await?;
        }
        Ok(())
    }

    /// Publishes every draft result for a (class, year, exam) key and
    /// emits one class-wide announcement.
    ///
    /// Idempotent on the records: a repeat run flips nothing and reports
    /// `published: 0`. The announcement is sent once per invocation even
    /// when no record was flipped — including the no-results case. That
    /// matches the legacy system; see DESIGN.md. Ordering is
    /// flips-then-notify, not transactional across both.
    #[instrument(skip(state, req), fields(class = %req.class_name, exam = ?req.exam_type))]
    pub async fn publish(
        state: &AppState,
        req: PublishRequest,
    ) -> Result<PublishSummary, AppError> {
        let matched = state
            .results
            .find_by_class_year_and_exam(&req.class_name, &req.academic_year, req.exam_type)
            .await?;
        let total = matched.len();

        let now = Utc::now();
        let mut drafts: Vec<StudentResult> =
            matched.into_iter().filter(|r| !r.is_published).collect();
        for record in &mut drafts {
            record.is_published = true;
            record.updated_at = now;
        }
        let published = drafts.len();
        if published > 0 {
            state.results.save_all(drafts).await?;
        }

        let title = format!("{} Results Published", req.exam_type.display_name());
        let message = format!(
            "{} results for {} ({}) are now available.",
            req.exam_type.display_name(),
            req.class_name,
            req.academic_year
        );
        state
            .notifier
            .send(&title, &message, &req.class_name, Priority::High)
            .await?;

        info!(total, published, "Publish workflow completed");
        Ok(PublishSummary { total, published })
    }
}
