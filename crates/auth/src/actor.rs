//! The authenticated actor: account identity plus tenant placement.

use serde::{Deserialize, Serialize};

use tenure_core::{CompanyId, DepartmentId, EmployeeId, UserId};

use crate::Role;

/// Link from a user account to its employee profile.
///
/// Resolved once per request by the transport layer. Accounts without a
/// profile (freshly provisioned users, platform operators) carry `None`
/// on [`Actor::profile`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLink {
    pub employee_id: EmployeeId,
    pub company_id: CompanyId,
    pub department_id: Option<DepartmentId>,
}

/// A fully resolved actor for authorization decisions.
///
/// Construction is intentionally decoupled from storage and transport: the
/// API derives actors from verified claims plus one profile lookup, tests
/// build them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    /// Operator flag carried alongside the role. Grants the same bypass as
    /// [`Role::Superadmin`].
    pub is_superuser: bool,
    pub profile: Option<EmployeeLink>,
}

impl Actor {
    /// Superadmin status comes from either the role or the account flag.
    pub fn is_superadmin(&self) -> bool {
        self.role == Role::Superadmin || self.is_superuser
    }

    /// The actor's own employee id, when a profile is linked.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.profile.map(|p| p.employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_actor(role: Role) -> Actor {
        Actor {
            user_id: UserId::new(),
            email: "someone@example.com".to_string(),
            role,
            is_active: true,
            is_superuser: false,
            profile: None,
        }
    }

    #[test]
    fn superuser_flag_grants_superadmin() {
        let mut actor = base_actor(Role::Viewer);
        assert!(!actor.is_superadmin());
        actor.is_superuser = true;
        assert!(actor.is_superadmin());
    }

    #[test]
    fn superadmin_role_grants_superadmin() {
        assert!(base_actor(Role::Superadmin).is_superadmin());
    }

    #[test]
    fn employee_id_requires_profile() {
        let mut actor = base_actor(Role::Employee);
        assert_eq!(actor.employee_id(), None);

        let link = EmployeeLink {
            employee_id: EmployeeId::new(),
            company_id: CompanyId::new(),
            department_id: None,
        };
        actor.profile = Some(link);
        assert_eq!(actor.employee_id(), Some(link.employee_id));
    }
}
