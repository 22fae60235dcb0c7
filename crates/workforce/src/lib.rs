//! `tenure-workforce` — employee profiles.
//!
//! An employee profile ties a user account into a company (and optionally a
//! department). It is the record tenant scoping resolves through, so most
//! policy questions start here.

pub mod employee;

pub use employee::{Employee, EmployeePatch};
