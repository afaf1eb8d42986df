use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use plantops_core::DomainError;
use plantops_infra::reports;
use plantops_infra::store::queries;
use plantops_records::ProductionRun;

use crate::app::routes::crud;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    crud::router::<ProductionRun>()
        .route("/efficiency/:year", get(efficiency_for_year))
        .route("/year/:year", get(productions_in_year))
        .route("/day/:date", get(productions_on_day))
        .route("/days", get(productions_between))
        .route("/id/:id", get(crud::fetch::<ProductionRun>))
}

pub async fn efficiency_for_year(
    Extension(services): Extension<Arc<AppServices>>,
    Path(year): Path<String>,
) -> axum::response::Response {
    let year = match dto::parse_year(&year) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match reports::production_efficiency_for_year(&services.productions.list(), year) {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn productions_in_year(
    Extension(services): Extension<Arc<AppServices>>,
    Path(year): Path<String>,
) -> axum::response::Response {
    let year = match dto::parse_year(&year) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let runs = queries::productions_in_year(services.productions.as_ref(), year);
    (StatusCode::OK, Json(runs)).into_response()
}

pub async fn productions_on_day(
    Extension(services): Extension<Arc<AppServices>>,
    Path(date): Path<String>,
) -> axum::response::Response {
    let date = match dto::parse_date(&date) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let runs = queries::productions_on_day(services.productions.as_ref(), date);
    (StatusCode::OK, Json(runs)).into_response()
}

pub async fn productions_between(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::DaysQuery>,
) -> axum::response::Response {
    if q.end_date < q.start_date {
        return errors::domain_error_to_response(DomainError::validation("end_date is before start_date"));
    }

    let runs = queries::productions_between(services.productions.as_ref(), q.start_date, q.end_date, &q.filter());
    (StatusCode::OK, Json(runs)).into_response()
}
