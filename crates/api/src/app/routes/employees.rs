use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::ActorContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:employee_slug",
            get(get_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
        .route("/:employee_slug/reviews", get(list_employee_reviews))
}

pub async fn list_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
) -> axum::response::Response {
    match services.list_employees(ctx.actor()) {
        Ok(employees) => {
            let today = Utc::now().date_naive();
            let items = employees
                .into_iter()
                .map(|employee| dto::employee_to_json(employee, today))
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(employee_slug): Path<String>,
) -> axum::response::Response {
    match services.get_employee(ctx.actor(), &employee_slug) {
        Ok(employee) => (
            StatusCode::OK,
            Json(dto::employee_to_json(employee, Utc::now().date_naive())),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Json(body): Json<dto::CreateEmployeeRequest>,
) -> axum::response::Response {
    match services.create_employee(ctx.actor(), body) {
        Ok(employee) => (
            StatusCode::CREATED,
            Json(dto::employee_to_json(employee, Utc::now().date_naive())),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Body arrives as raw JSON: the self-service field check must see the
/// submitted key set, including keys an `EmployeePatch` would not capture.
pub async fn update_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(employee_slug): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    match services.update_employee(ctx.actor(), &employee_slug, body) {
        Ok(employee) => (
            StatusCode::OK,
            Json(dto::employee_to_json(employee, Utc::now().date_naive())),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(employee_slug): Path<String>,
) -> axum::response::Response {
    match services.delete_employee(ctx.actor(), &employee_slug) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_employee_reviews(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(employee_slug): Path<String>,
) -> axum::response::Response {
    match services.list_employee_reviews(ctx.actor(), &employee_slug) {
        Ok(reviews) => {
            let items = reviews
                .into_iter()
                .map(dto::review_to_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}
