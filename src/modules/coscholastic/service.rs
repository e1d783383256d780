use crate::modules::coscholastic::model::{CoscholasticAssessment, UpsertCoscholasticDto};
use crate::state::AppState;
use crate::utils::errors::AppError;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct CoscholasticService;

impl CoscholasticService {
    /// Creates or replaces the assessment for (student, year, term).
    #[instrument(skip(state, dto), fields(student = %dto.student_id, term = ?dto.term))]
    pub async fn upsert(
        state: &AppState,
        dto: UpsertCoscholasticDto,
    ) -> Result<CoscholasticAssessment, AppError> {
        let assessment = CoscholasticAssessment {
            id: Uuid::new_v4(),
            student_id: dto.student_id,
            student_name: dto.student_name,
            class_name: dto.class_name,
            academic_year: dto.academic_year,
            term: dto.term,
            areas: dto.areas,
            entered_by: dto.entered_by,
            created_at: Utc::now(),
        };

        let saved = state.coscholastic.upsert(assessment).await?;
        info!(assessment_id = %saved.id, "Co-scholastic assessment saved");
        Ok(saved)
    }

    /// A student's assessments for one year, both terms if present.
    #[instrument(skip(state))]
    pub async fn student_assessments(
        state: &AppState,
        student_id: &str,
        academic_year: &str,
    ) -> Result<Vec<CoscholasticAssessment>, AppError> {
        state
            .coscholastic
            .find_by_student_and_year(student_id, academic_year)
            .await
    }
}
