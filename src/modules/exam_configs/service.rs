use crate::modules::exam_configs::model::{CreateExamConfigDto, ExamConfig};
use crate::state::AppState;
use crate::utils::errors::AppError;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct ExamConfigService;

impl ExamConfigService {
    /// Creates or replaces the config for (academic year, exam type).
    /// Weightages are taken as given; whether a year's active configs sum
    /// to 100 is the administrator's call.
    #[instrument(skip(state, dto), fields(year = %dto.academic_year, exam = ?dto.exam_type))]
    pub async fn create(
        state: &AppState,
        dto: CreateExamConfigDto,
    ) -> Result<ExamConfig, AppError> {
        let config = ExamConfig {
            id: Uuid::new_v4(),
            academic_year: dto.academic_year,
            exam_type: dto.exam_type,
            display_name: dto.display_name,
            weightage_percent: dto.weightage_percent,
            max_marks_default: dto.max_marks_default,
            is_active: dto.is_active,
            created_at: Utc::now(),
        };

        let saved = state.exam_configs.save(config).await?;
        info!(config_id = %saved.id, "Exam configuration saved");
        Ok(saved)
    }

    /// All configs for a year, active or not.
    #[instrument(skip(state))]
    pub async fn list_by_year(
        state: &AppState,
        academic_year: &str,
    ) -> Result<Vec<ExamConfig>, AppError> {
        state.exam_configs.find_by_year(academic_year).await
    }
}
