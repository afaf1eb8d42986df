use axum::Router;

use plantops_records::{MaterialInOut, MaterialLot, MaterialPlan};

pub mod crud;
pub mod inventories;
pub mod material_inventories;
pub mod materials;
pub mod plans;
pub mod predictions;
pub mod productions;
pub mod system;

/// Router for every resource endpoint.
pub fn router() -> Router {
    Router::new()
        .nest("/plans", plans::router())
        .nest("/productions", productions::router())
        .nest("/inventories", inventories::router())
        .nest("/materials", materials::router())
        .nest("/material-plans", crud::router::<MaterialPlan>())
        .nest("/material-lots", crud::router::<MaterialLot>())
        .nest("/materials-in-out", crud::router::<MaterialInOut>())
        .nest("/material-invens", material_inventories::router())
        .nest("/predictions", predictions::router())
}
