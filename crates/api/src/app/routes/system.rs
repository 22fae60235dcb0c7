use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use tenure_auth::{company_of, department_of};

use crate::context::ActorContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(ctx): Extension<ActorContext>) -> impl IntoResponse {
    let actor = ctx.actor();
    Json(serde_json::json!({
        "user_id": actor.user_id,
        "email": actor.email,
        "role": actor.role.as_str(),
        "employee_id": actor.employee_id(),
        "company_id": company_of(actor),
        "department_id": department_of(actor),
    }))
}
