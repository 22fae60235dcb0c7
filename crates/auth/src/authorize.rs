//! Access-control decisions for every HR resource kind.
//!
//! One entrypoint, [`authorize`], evaluates an actor against an operation
//! and a policy view of the target resource.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy check)
//!
//! Denials are ordinary values carrying a reason, never errors: the policy
//! layer has no failure mode of its own.

use serde::Serialize;

use tenure_core::{CompanyId, DepartmentId, EmployeeId};

use crate::{Actor, Role, department_of, same_company};

// ─────────────────────────────────────────────────────────────────────────────
// Decision
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of a policy check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub allow: bool,
    /// Present exactly when the check denied.
    pub reason: Option<String>,
}

impl Decision {
    pub fn allowed() -> Self {
        Self {
            allow: true,
            reason: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allow: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allow
    }
}

/// Operation class, mirroring the HTTP safe/unsafe split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Write,
    Delete,
}

// ─────────────────────────────────────────────────────────────────────────────
// Resource views
// ─────────────────────────────────────────────────────────────────────────────

/// Policy-relevant view of a target resource.
///
/// Services build one of these from the persisted record before asking for
/// a decision; the engine itself never touches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceView {
    Company {
        id: CompanyId,
    },
    Department {
        company: CompanyId,
    },
    Employee {
        id: EmployeeId,
        company: CompanyId,
        department: Option<DepartmentId>,
    },
    Project {
        company: CompanyId,
        department: Option<DepartmentId>,
    },
    Review {
        company: CompanyId,
    },
}

impl ResourceView {
    /// Company that owns the resource. For a company, itself.
    pub fn company(&self) -> CompanyId {
        match *self {
            ResourceView::Company { id } => id,
            ResourceView::Department { company }
            | ResourceView::Employee { company, .. }
            | ResourceView::Project { company, .. }
            | ResourceView::Review { company } => company,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Role gates
// ─────────────────────────────────────────────────────────────────────────────

/// Role-set membership gate.
///
/// A rule is a value: the roles allowed through, plus whether superadmin
/// bypasses the list. Compound policies compose `permits` calls instead of
/// inheriting from each other.
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    pub allowed: &'static [Role],
    pub allow_super: bool,
}

impl RoleGate {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self {
            allowed,
            allow_super: true,
        }
    }

    /// Membership check. Inactive accounts never pass; superadmin passes
    /// when the gate says so; everyone else must hold a listed role.
    pub fn permits(&self, actor: &Actor) -> bool {
        if !actor.is_active {
            return false;
        }
        if self.allow_super && actor.is_superadmin() {
            return true;
        }
        self.allowed.contains(&actor.role)
    }
}

/// Company creation, the one write with no existing resource to scope to.
pub const ADMIN_GATE: RoleGate = RoleGate::new(&[Role::CompanyAdmin]);

/// Employee record creation.
pub const STAFFING_GATE: RoleGate = RoleGate::new(&[Role::CompanyAdmin, Role::Hr]);

/// Review scheduling and feedback collection.
pub const SCHEDULING_GATE: RoleGate = RoleGate::new(&[Role::CompanyAdmin, Role::Hr, Role::Manager]);

/// Review approval and rejection.
pub const APPROVAL_GATE: RoleGate = RoleGate::new(&[Role::CompanyAdmin, Role::Manager]);

// ─────────────────────────────────────────────────────────────────────────────
// The decision engine
// ─────────────────────────────────────────────────────────────────────────────

/// Decide whether `actor` may perform `op` on `resource`.
///
/// Evaluation order is fixed: active check, superadmin bypass, same-company
/// check, then the per-resource role rules. An actor whose company scope
/// cannot be resolved fails the same-company check against every resource.
pub fn authorize(actor: &Actor, op: Operation, resource: &ResourceView) -> Decision {
    if !actor.is_active {
        return Decision::denied("Account is inactive.");
    }
    if actor.is_superadmin() {
        return Decision::allowed();
    }
    if !same_company(actor, resource.company()) {
        return Decision::denied("Not same company.");
    }
    match *resource {
        ResourceView::Company { .. } => org_rules(actor, op, "companies"),
        ResourceView::Department { .. } => org_rules(actor, op, "departments"),
        ResourceView::Employee { id, department, .. } => employee_rules(actor, op, id, department),
        ResourceView::Project { department, .. } => project_rules(actor, op, department),
        ResourceView::Review { .. } => review_rules(actor, op),
    }
}

/// Companies and departments: anyone in the company reads, admins write.
fn org_rules(actor: &Actor, op: Operation, noun: &'static str) -> Decision {
    match op {
        Operation::Read => Decision::allowed(),
        Operation::Write | Operation::Delete => match actor.role {
            Role::Superadmin | Role::CompanyAdmin => Decision::allowed(),
            Role::Hr | Role::Manager | Role::Employee | Role::Viewer => {
                Decision::denied(format!("Only a company admin can modify {noun}."))
            }
        },
    }
}

fn employee_rules(
    actor: &Actor,
    op: Operation,
    target: EmployeeId,
    target_department: Option<DepartmentId>,
) -> Decision {
    let own_profile = actor.employee_id() == Some(target);
    match op {
        Operation::Read => match actor.role {
            Role::Superadmin | Role::CompanyAdmin | Role::Hr => Decision::allowed(),
            // A department-less manager sees only department-less employees.
            Role::Manager if department_of(actor) == target_department => Decision::allowed(),
            Role::Employee if own_profile => Decision::allowed(),
            Role::Manager | Role::Employee | Role::Viewer => Decision::denied("Not allowed."),
        },
        Operation::Write => match actor.role {
            Role::Superadmin | Role::CompanyAdmin | Role::Hr => Decision::allowed(),
            Role::Employee if own_profile => Decision::allowed(),
            Role::Manager | Role::Employee | Role::Viewer => {
                Decision::denied("Not allowed to update.")
            }
        },
        Operation::Delete => match actor.role {
            Role::Superadmin | Role::CompanyAdmin => Decision::allowed(),
            Role::Hr | Role::Manager | Role::Employee | Role::Viewer => {
                Decision::denied("Not allowed to delete.")
            }
        },
    }
}

fn project_rules(actor: &Actor, op: Operation, target_department: Option<DepartmentId>) -> Decision {
    match op {
        Operation::Read => Decision::allowed(),
        Operation::Write | Operation::Delete => match actor.role {
            Role::Superadmin | Role::CompanyAdmin => Decision::allowed(),
            Role::Manager if department_of(actor) == target_department => Decision::allowed(),
            Role::Manager => {
                Decision::denied("Managers can only modify projects in their own department.")
            }
            Role::Hr | Role::Employee | Role::Viewer => {
                Decision::denied("Not allowed to modify projects.")
            }
        },
    }
}

/// Reviews: visible and writable inside the company, deletion is admin-only.
/// Stage movement has its own gate in the workflow layer.
fn review_rules(actor: &Actor, op: Operation) -> Decision {
    match op {
        Operation::Read | Operation::Write => Decision::allowed(),
        Operation::Delete => match actor.role {
            Role::Superadmin | Role::CompanyAdmin => Decision::allowed(),
            Role::Hr | Role::Manager | Role::Employee | Role::Viewer => {
                Decision::denied("Not allowed to delete.")
            }
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
