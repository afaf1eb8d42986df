use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use plantops_infra::reports;
use plantops_records::Material;

use crate::app::dto;
use crate::app::routes::crud;
use crate::app::services::AppServices;

pub fn router() -> Router {
    crud::router::<Material>()
        .route("/rate/:year", get(material_rates_for_year))
        .route("/rates/:year/:month", get(material_growth_for_month))
}

pub async fn material_rates_for_year(
    Extension(services): Extension<Arc<AppServices>>,
    Path(year): Path<String>,
) -> axum::response::Response {
    let year = match dto::parse_year(&year) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let rows = reports::material_rates_for_year(&services.material_plans.list(), year);
    (StatusCode::OK, Json(rows)).into_response()
}

pub async fn material_growth_for_month(
    Extension(services): Extension<Arc<AppServices>>,
    Path((year, month)): Path<(String, String)>,
) -> axum::response::Response {
    let month = match dto::parse_month_key(&year, &month) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let rows = reports::material_growth_for_month(
        &services.materials.list(),
        &services.material_inventories.list(),
        month,
    );
    (StatusCode::OK, Json(rows)).into_response()
}
