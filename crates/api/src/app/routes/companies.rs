use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::ActorContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_company).get(list_companies))
        .route(
            "/:company_slug",
            get(get_company)
                .patch(update_company)
                .delete(delete_company),
        )
}

pub async fn list_companies(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
) -> axum::response::Response {
    match services.list_companies(ctx.actor()) {
        Ok(views) => {
            let items = views
                .into_iter()
                .map(dto::company_to_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_company(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(company_slug): Path<String>,
) -> axum::response::Response {
    match services.get_company(ctx.actor(), &company_slug) {
        Ok(view) => (StatusCode::OK, Json(dto::company_to_json(view))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_company(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Json(body): Json<dto::CreateCompanyRequest>,
) -> axum::response::Response {
    match services.create_company(ctx.actor(), body) {
        Ok(view) => (StatusCode::CREATED, Json(dto::company_to_json(view))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_company(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(company_slug): Path<String>,
    Json(body): Json<dto::UpdateCompanyRequest>,
) -> axum::response::Response {
    match services.update_company(ctx.actor(), &company_slug, body) {
        Ok(view) => (StatusCode::OK, Json(dto::company_to_json(view))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_company(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(company_slug): Path<String>,
) -> axum::response::Response {
    match services.delete_company(ctx.actor(), &company_slug) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
