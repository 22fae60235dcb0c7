//! `tenure-org` — companies and departments.
//!
//! The company is the tenant boundary: every other record in the system
//! hangs off exactly one company. Departments subdivide a company and are
//! the unit managers are scoped to.

pub mod company;
pub mod department;

pub use company::{Company, CompanyPatch};
pub use department::{Department, DepartmentPatch};
