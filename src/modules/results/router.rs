use crate::modules::results::controller::{
    bulk_enter_results, delete_result, get_class_analytics, get_class_results, get_report_card,
    get_student_results, publish_results, update_result,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn init_results_router() -> Router<AppState> {
    Router::new()
        .route("/bulk", post(bulk_enter_results))
        .route(
            "/class/{class_name}/year/{academic_year}",
            get(get_class_results),
        )
        .route("/student/{student_id}", get(get_student_results))
        .route("/{id}", put(update_result).delete(delete_result))
        .route("/publish", post(publish_results))
        .route(
            "/report-card/{student_id}/year/{academic_year}",
            get(get_report_card),
        )
        .route(
            "/analytics/class/{class_name}/year/{academic_year}",
            get(get_class_analytics),
        )
}
