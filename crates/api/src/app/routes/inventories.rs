use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use plantops_infra::store::queries;
use plantops_records::InventoryEntry;

use crate::app::routes::crud;
use crate::app::services::AppServices;
use crate::app::dto;

pub fn router() -> Router {
    crud::router::<InventoryEntry>().route("/month", get(inventory_in_month))
}

pub async fn inventory_in_month(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::MonthQuery>,
) -> axum::response::Response {
    let month = match q.month_key() {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let entries = queries::inventory_in_month(services.inventories.as_ref(), month);
    (StatusCode::OK, Json(entries)).into_response()
}
