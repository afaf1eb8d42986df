use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use plantops_infra::store::queries;
use plantops_records::MaterialInventoryEntry;

use crate::app::routes::crud;
use crate::app::services::AppServices;
use crate::app::dto;

pub fn router() -> Router {
    crud::router::<MaterialInventoryEntry>().route("/month", get(material_inventory_in_month))
}

pub async fn material_inventory_in_month(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::MonthQuery>,
) -> axum::response::Response {
    let month = match q.month_key() {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let entries = queries::material_inventory_in_month(services.material_inventories.as_ref(), month);
    (StatusCode::OK, Json(entries)).into_response()
}
