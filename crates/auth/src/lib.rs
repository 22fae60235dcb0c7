//! `tenure-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. The API
//! layer resolves an [`Actor`] once per request; services then ask
//! [`authorize`] (or a [`RoleGate`]) for a [`Decision`] and translate
//! denials into transport errors.

pub mod actor;
pub mod authorize;
pub mod claims;
pub mod fields;
pub mod roles;
pub mod scope;

pub use actor::{Actor, EmployeeLink};
pub use authorize::{
    ADMIN_GATE, APPROVAL_GATE, Decision, Operation, ResourceView, RoleGate, SCHEDULING_GATE,
    STAFFING_GATE, authorize,
};
pub use claims::{
    Hs256JwtValidator, JwtClaims, JwtValidator, TokenValidationError, validate_claims,
};
pub use fields::{SELF_UPDATE_FIELDS, SelfUpdateViolation, validate_self_update};
pub use roles::{Role, UnknownRole};
pub use scope::{company_of, department_of, same_company};
