use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use tenure_auth::{Actor, EmployeeLink, JwtValidator};
use tenure_infra::{EmployeeStore, InMemoryHrStore};

use crate::context::ActorContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
    pub store: Arc<InMemoryHrStore>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let claims = state
        .jwt
        .validate(token, Utc::now())
        .map_err(|_e| StatusCode::UNAUTHORIZED)?;

    if !claims.is_active {
        return Err(StatusCode::FORBIDDEN);
    }

    // One profile lookup per request resolves the actor's tenant scope.
    let profile = state
        .store
        .find_by_user(claims.sub)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .map(|employee| EmployeeLink {
            employee_id: employee.id,
            company_id: employee.company_id,
            department_id: employee.department_id,
        });

    let actor = Actor {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
        is_active: claims.is_active,
        is_superuser: claims.is_superuser,
        profile,
    };

    req.extensions_mut().insert(ActorContext::new(actor));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
