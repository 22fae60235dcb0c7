use axum::{Router, routing::get};

pub mod companies;
pub mod departments;
pub mod employees;
pub mod projects;
pub mod reviews;
pub mod system;

/// Router for all authenticated (actor-scoped) endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/companies", companies::router())
        .nest(
            "/companies/:company_slug/departments",
            departments::router(),
        )
        .nest("/employees", employees::router())
        .nest("/projects", projects::router())
        .nest("/reviews", reviews::router())
}
