use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::ActorContext;

/// Nested under `/companies/:company_slug/departments`.
pub fn router() -> Router {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route(
            "/:department_slug",
            get(get_department)
                .patch(update_department)
                .delete(delete_department),
        )
}

pub async fn list_departments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(company_slug): Path<String>,
) -> axum::response::Response {
    match services.list_departments(ctx.actor(), &company_slug) {
        Ok(views) => {
            let items = views
                .into_iter()
                .map(dto::department_to_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path((company_slug, department_slug)): Path<(String, String)>,
) -> axum::response::Response {
    match services.get_department(ctx.actor(), &company_slug, &department_slug) {
        Ok(view) => (StatusCode::OK, Json(dto::department_to_json(view))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(company_slug): Path<String>,
    Json(body): Json<dto::CreateDepartmentRequest>,
) -> axum::response::Response {
    match services.create_department(ctx.actor(), &company_slug, body) {
        Ok(view) => (StatusCode::CREATED, Json(dto::department_to_json(view))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path((company_slug, department_slug)): Path<(String, String)>,
    Json(body): Json<dto::UpdateDepartmentRequest>,
) -> axum::response::Response {
    match services.update_department(ctx.actor(), &company_slug, &department_slug, body) {
        Ok(view) => (StatusCode::OK, Json(dto::department_to_json(view))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_department(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path((company_slug, department_slug)): Path<(String, String)>,
) -> axum::response::Response {
    match services.delete_department(ctx.actor(), &company_slug, &department_slug) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
