//! `tenure-projects` — projects and staff assignments.

pub mod project;

pub use project::{Project, ProjectPatch};
