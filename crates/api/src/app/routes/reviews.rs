use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};

use tenure_core::ReviewId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::ActorContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_review))
        .route("/:review_id", get(get_review).delete(delete_review))
        .route("/:review_id/transition", patch(transition_review))
}

fn parse_review_id(raw: &str) -> Result<ReviewId, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid review id")
    })
}

pub async fn create_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Json(body): Json<dto::CreateReviewRequest>,
) -> axum::response::Response {
    match services.create_review(ctx.actor(), body) {
        Ok(review) => (StatusCode::CREATED, Json(dto::review_to_json(review))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(review_id): Path<String>,
) -> axum::response::Response {
    let id = match parse_review_id(&review_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.get_review(ctx.actor(), id) {
        Ok(review) => (StatusCode::OK, Json(dto::review_to_json(review))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn transition_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(review_id): Path<String>,
    Json(body): Json<dto::TransitionRequest>,
) -> axum::response::Response {
    let id = match parse_review_id(&review_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.transition_review(ctx.actor(), id, body) {
        Ok(review) => (StatusCode::OK, Json(dto::review_to_json(review))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<ActorContext>,
    Path(review_id): Path<String>,
) -> axum::response::Response {
    let id = match parse_review_id(&review_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.delete_review(ctx.actor(), id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
