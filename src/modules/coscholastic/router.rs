use crate::modules::coscholastic::controller::{get_student_coscholastic, upsert_coscholastic};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_coscholastic_router() -> Router<AppState> {
    Router::new()
        .route("/", post(upsert_coscholastic))
        .route(
            "/student/{student_id}/year/{academic_year}",
            get(get_student_coscholastic),
        )
}
