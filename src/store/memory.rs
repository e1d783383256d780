//! In-memory store backing the integration tests.
//!
//! One [`MemoryStore`] implements every collaborator trait, mirroring the
//! Postgres behaviour closely enough for the engine's contract tests:
//! key-scoped replacement is atomic under its write lock, upserts key on
//! record id, and sent notifications are recorded for assertions.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use gradebook_models::{
    CoscholasticAssessment, ExamConfig, ExamType, Priority, ResultKey, StudentResult,
};
use uuid::Uuid;

use super::{CoscholasticStore, ExamConfigStore, NotificationSender, ResultStore};
use crate::utils::errors::AppError;

/// A notification captured instead of delivered.
#[derive(Clone, Debug)]
pub struct SentNotification {
    pub title: String,
    pub message: String,
    pub target_class: String,
    pub priority: Priority,
}

#[derive(Default)]
pub struct MemoryStore {
    results: RwLock<HashMap<Uuid, StudentResult>>,
    exam_configs: RwLock<Vec<ExamConfig>>,
    coscholastic: RwLock<Vec<CoscholasticAssessment>>,
    notifications: Mutex<Vec<SentNotification>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything the notifier "sent", in order.
    pub fn sent_notifications(&self) -> Vec<SentNotification> {
        self.notifications.lock().expect("notification log poisoned").clone()
    }

    fn collect_results<F>(&self, predicate: F) -> Vec<StudentResult>
    where
        F: Fn(&StudentResult) -> bool,
    {
        let results = self.results.read().expect("result store poisoned");
        let mut matched: Vec<StudentResult> =
            results.values().filter(|r| predicate(r)).cloned().collect();
        // HashMap iteration order is arbitrary; keep reads deterministic.
        matched.sort_by(|a, b| {
            (&a.academic_year, a.exam_type, &a.subject, &a.roll_number, a.id).cmp(&(
                &b.academic_year,
                b.exam_type,
                &b.subject,
                &b.roll_number,
                b.id,
            ))
        });
        matched
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn find_by_student(&self, student_id: &str) -> Result<Vec<StudentResult>, AppError> {
        Ok(self.collect_results(|r| r.student_id == student_id))
    }

    async fn find_by_student_and_year(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> Result<Vec<StudentResult>, AppError> {
        Ok(self
            .collect_results(|r| r.student_id == student_id && r.academic_year == academic_year))
    }

    async fn find_by_class_and_year(
        &self,
        class_name: &str,
        academic_year: &str,
    ) -> Result<Vec<StudentResult>, AppError> {
        Ok(self.collect_results(|r| r.class_name == class_name && r.academic_year == academic_year))
    }

    async fn find_by_class_year_and_exam(
        &self,
        class_name: &str,
        academic_year: &str,
        exam_type: ExamType,
    ) -> Result<Vec<StudentResult>, AppError> {
        Ok(self.collect_results(|r| {
            r.class_name == class_name
                && r.academic_year == academic_year
                && r.exam_type == exam_type
        }))
    }

    async fn find_by_key(&self, key: &ResultKey) -> Result<Vec<StudentResult>, AppError> {
        Ok(self.collect_results(|r| r.key() == *key))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StudentResult>, AppError> {
        let results = self.results.read().expect("result store poisoned");
        Ok(results.get(&id).cloned())
    }

    async fn save_all(
        &self,
        batch: Vec<StudentResult>,
    ) -> Result<Vec<StudentResult>, AppError> {
        let mut results = self.results.write().expect("result store poisoned");
        for record in &batch {
            results.insert(record.id, record.clone());
        }
        Ok(batch)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut results = self.results.write().expect("result store poisoned");
        results.remove(&id);
        Ok(())
    }

    async fn replace_for_key(
        &self,
        key: &ResultKey,
        batch: Vec<StudentResult>,
    ) -> Result<Vec<StudentResult>, AppError> {
        let mut results = self.results.write().expect("result store poisoned");
        results.retain(|_, r| r.key() != *key);
        for record in &batch {
            results.insert(record.id, record.clone());
        }
        Ok(batch)
    }
}

#[async_trait]
impl ExamConfigStore for MemoryStore {
    async fn find_active_by_year(
        &self,
        academic_year: &str,
    ) -> Result<Vec<ExamConfig>, AppError> {
        let configs = self.exam_configs.read().expect("config store poisoned");
        Ok(configs
            .iter()
            .filter(|c| c.academic_year == academic_year && c.is_active)
            .cloned()
            .collect())
    }

    async fn find_by_year(&self, academic_year: &str) -> Result<Vec<ExamConfig>, AppError> {
        let configs = self.exam_configs.read().expect("config store poisoned");
        Ok(configs
            .iter()
            .filter(|c| c.academic_year == academic_year)
            .cloned()
            .collect())
    }

    async fn save(&self, config: ExamConfig) -> Result<ExamConfig, AppError> {
        let mut configs = self.exam_configs.write().expect("config store poisoned");
        configs
            .retain(|c| !(c.academic_year == config.academic_year && c.exam_type == config.exam_type));
        configs.push(config.clone());
        Ok(config)
    }
}

#[async_trait]
impl CoscholasticStore for MemoryStore {
    async fn find_by_student_and_year(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> Result<Vec<CoscholasticAssessment>, AppError> {
        let assessments = self.coscholastic.read().expect("coscholastic store poisoned");
        Ok(assessments
            .iter()
            .filter(|a| a.student_id == student_id && a.academic_year == academic_year)
            .cloned()
            .collect())
    }

    async fn upsert(
        &self,
        assessment: CoscholasticAssessment,
    ) -> Result<CoscholasticAssessment, AppError> {
        let mut assessments = self.coscholastic.write().expect("coscholastic store poisoned");
        assessments.retain(|a| {
            !(a.student_id == assessment.student_id
                && a.academic_year == assessment.academic_year
                && a.term == assessment.term)
        });
        assessments.push(assessment.clone());
        Ok(assessment)
    }
}

#[async_trait]
impl NotificationSender for MemoryStore {
    async fn send(
        &self,
        title: &str,
        message: &str,
        target_class: &str,
        priority: Priority,
    ) -> Result<(), AppError> {
        let mut log = self.notifications.lock().expect("notification log poisoned");
        log.push(SentNotification {
            title: title.to_string(),
            message: message.to_string(),
            target_class: target_class.to_string(),
            priority,
        });
        Ok(())
    }
}
