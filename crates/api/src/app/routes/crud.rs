//! Generic create/list/get/update/delete handlers shared by every record resource.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use plantops_core::Entity;
use plantops_records::{
    InventoryEntry, Material, MaterialInOut, MaterialInventoryEntry, MaterialLot, MaterialPlan, Plan, ProductionRun,
    Record,
};

use crate::app::services::{AppServices, SharedStore};
use crate::app::{dto, errors};

/// A record type exposed over HTTP, and where its store lives.
pub trait Resource: Record + Serialize {
    fn store(services: &AppServices) -> &SharedStore<Self>;
}

macro_rules! resources {
    ($($t:ty => $field:ident),* $(,)?) => {
        $(
            impl Resource for $t {
                fn store(services: &AppServices) -> &SharedStore<Self> {
                    &services.$field
                }
            }
        )*
    };
}

resources!(
    Plan => plans,
    ProductionRun => productions,
    InventoryEntry => inventories,
    Material => materials,
    MaterialPlan => material_plans,
    MaterialLot => material_lots,
    MaterialInOut => materials_in_out,
    MaterialInventoryEntry => material_inventories,
);

/// `POST /`, `GET /all`, and `GET|PUT|DELETE /:id` for one resource.
pub fn router<R>() -> Router
where
    R: Resource,
    R::New: DeserializeOwned,
    R::Patch: DeserializeOwned,
{
    Router::new()
        .route("/", post(create::<R>))
        .route("/all", get(list::<R>))
        .route("/:id", get(fetch::<R>).put(update::<R>).delete(remove::<R>))
}

pub async fn create<R>(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<R::New>,
) -> axum::response::Response
where
    R: Resource,
    R::New: DeserializeOwned,
{
    match R::store(&services).insert(body) {
        Ok(record) => {
            tracing::info!(kind = R::KIND, id = %record.id(), "record created");
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list<R: Resource>(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    Json(R::store(&services).list()).into_response()
}

pub async fn fetch<R: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match R::store(&services).get(id) {
        Some(record) => (StatusCode::OK, Json(record)).into_response(),
        None => errors::not_found(R::KIND),
    }
}

pub async fn update<R>(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(patch): Json<R::Patch>,
) -> axum::response::Response
where
    R: Resource,
    R::Patch: DeserializeOwned,
{
    let id = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match R::store(&services).update(id, patch) {
        Ok(record) => {
            tracing::info!(kind = R::KIND, id = %id, "record updated");
            (StatusCode::OK, Json(record)).into_response()
        }
        Err(plantops_core::DomainError::NotFound) => errors::not_found(R::KIND),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn remove<R: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match R::store(&services).delete(id) {
        Some(_) => {
            tracing::info!(kind = R::KIND, id = %id, "record deleted");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "id": id,
                    "detail": format!("{} deleted", R::KIND),
                })),
            )
                .into_response()
        }
        None => errors::not_found(R::KIND),
    }
}
