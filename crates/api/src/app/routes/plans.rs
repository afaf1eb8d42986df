use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use plantops_infra::reports;
use plantops_records::Plan;

use crate::app::routes::crud;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    crud::router::<Plan>()
        .route("/rate/:year", get(plan_rates_for_year))
        .route("/rates/:year/:month", get(plan_growth_for_month))
}

pub async fn plan_rates_for_year(
    Extension(services): Extension<Arc<AppServices>>,
    Path(year): Path<String>,
) -> axum::response::Response {
    let year = match dto::parse_year(&year) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match reports::plan_rates_for_year(&services.plans.list(), &services.productions.list(), year) {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn plan_growth_for_month(
    Extension(services): Extension<Arc<AppServices>>,
    Path((year, month)): Path<(String, String)>,
) -> axum::response::Response {
    let month = match dto::parse_month_key(&year, &month) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let rows = reports::plan_growth_for_month(&services.plans.list(), &services.inventories.list(), month);
    (StatusCode::OK, Json(rows)).into_response()
}
