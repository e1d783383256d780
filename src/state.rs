//! Shared application state: store collaborators behind trait objects,
//! the per-key entry locks, and request-level configuration.

use std::sync::Arc;

use gradebook_config::CorsConfig;
use gradebook_db::init_db_pool;
use sqlx::PgPool;

use crate::store::postgres::{
    PgCoscholasticStore, PgExamConfigStore, PgNotificationSender, PgResultStore,
};
use crate::store::{CoscholasticStore, ExamConfigStore, NotificationSender, ResultStore};
use crate::utils::keylock::KeyLocks;

#[derive(Clone)]
pub struct AppState {
    pub results: Arc<dyn ResultStore>,
    pub exam_configs: Arc<dyn ExamConfigStore>,
    pub coscholastic: Arc<dyn CoscholasticStore>,
    pub notifier: Arc<dyn NotificationSender>,
    /// Serializes mutations per (class, year, exam, subject) key.
    pub entry_locks: KeyLocks,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        results: Arc<dyn ResultStore>,
        exam_configs: Arc<dyn ExamConfigStore>,
        coscholastic: Arc<dyn CoscholasticStore>,
        notifier: Arc<dyn NotificationSender>,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            results,
            exam_configs,
            coscholastic,
            notifier,
            entry_locks: KeyLocks::new(),
            cors_config,
        }
    }

    /// Wires every collaborator to PostgreSQL on the given pool.
    pub fn with_postgres(pool: PgPool, cors_config: CorsConfig) -> Self {
        Self::new(
            Arc::new(PgResultStore::new(pool.clone())),
            Arc::new(PgExamConfigStore::new(pool.clone())),
            Arc::new(PgCoscholasticStore::new(pool.clone())),
            Arc::new(PgNotificationSender::new(pool)),
            cors_config,
        )
    }

    /// Wires every collaborator to one in-memory store.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn with_memory_store(store: Arc<crate::store::memory::MemoryStore>) -> Self {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            CorsConfig::from_env(),
        )
    }
}

pub async fn init_app_state() -> AppState {
    AppState::with_postgres(init_db_pool().await, CorsConfig::from_env())
}
