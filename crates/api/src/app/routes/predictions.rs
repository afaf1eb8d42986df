use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use plantops_infra::MassProductionInput;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/mass-production", post(predict_mass_production))
}

pub async fn predict_mass_production(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<MassProductionInput>,
) -> axum::response::Response {
    let history = services.stored_history();
    let today = Utc::now().date_naive();

    match services.predictor.predict(&history, &body, today) {
        Ok(forecast) => (StatusCode::OK, Json(forecast)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
