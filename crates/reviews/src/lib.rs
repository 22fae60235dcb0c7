//! `tenure-reviews` — performance reviews and their workflow.
//!
//! A review moves through a fixed pipeline of stages. Who may move it is a
//! pure policy question answered by [`can_transition`]; whether the hop
//! itself is legal is a separate, role-independent question answered by
//! [`Stage::can_advance_to`]. Callers apply both.

pub mod review;
pub mod workflow;

pub use review::{PerformanceReview, TransitionEffects};
pub use workflow::{Stage, UnknownStage, can_transition};
