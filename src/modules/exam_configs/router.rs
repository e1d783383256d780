use crate::modules::exam_configs::controller::{create_exam_config, get_exam_configs};
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_exam_configs_router() -> Router<AppState> {
    Router::new().route("/", post(create_exam_config).get(get_exam_configs))
}
