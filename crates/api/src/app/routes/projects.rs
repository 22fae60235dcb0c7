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

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:project_slug",
            get(get_project).patch(update_project).delete(delete_project),
        )
}

pub async fn list_projects(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
) -> axum::response::Response {
    match services.list_projects(ctx.actor()) {
        Ok(projects) => {
            let items = projects
                .into_iter()
                .map(dto::project_to_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_project(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(project_slug): Path<String>,
) -> axum::response::Response {
    match services.get_project(ctx.actor(), &project_slug) {
        Ok(project) => (StatusCode::OK, Json(dto::project_to_json(project))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_project(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Json(body): Json<dto::CreateProjectRequest>,
) -> axum::response::Response {
    match services.create_project(ctx.actor(), body) {
        Ok(project) => (StatusCode::CREATED, Json(dto::project_to_json(project))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_project(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(project_slug): Path<String>,
    Json(body): Json<dto::UpdateProjectRequest>,
) -> axum::response::Response {
    match services.update_project(ctx.actor(), &project_slug, body) {
        Ok(project) => (StatusCode::OK, Json(dto::project_to_json(project))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_project(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(project_slug): Path<String>,
) -> axum::response::Response {
    match services.delete_project(ctx.actor(), &project_slug) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
