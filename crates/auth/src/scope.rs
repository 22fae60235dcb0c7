//! Tenant scoping: where an actor sits in the org chart.
//!
//! All lookups go through the employee profile link. A missing link is an
//! expected state (accounts exist before onboarding completes) and surfaces
//! as `None`, never as an error and never as a panic.

use tenure_core::{CompanyId, DepartmentId};

use crate::Actor;

/// Company the actor belongs to, via their employee profile.
pub fn company_of(actor: &Actor) -> Option<CompanyId> {
    actor.profile.map(|p| p.company_id)
}

/// Department the actor belongs to, when the profile names one.
pub fn department_of(actor: &Actor) -> Option<DepartmentId> {
    actor.profile.and_then(|p| p.department_id)
}

/// Same-tenant membership check.
///
/// Unresolved scope is never "the same company": an actor without a profile
/// fails this check against every company.
pub fn same_company(actor: &Actor, company: CompanyId) -> bool {
    company_of(actor) == Some(company)
}
