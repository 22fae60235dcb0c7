//! Role model: one role per user account, drawn from a closed set.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role granted to a user account.
///
/// Exactly one role per account. The set is closed on purpose: every policy
/// rule matches on it exhaustively, so introducing a role forces a visit to
/// each rule that guards a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator. Bypasses tenant scoping entirely.
    Superadmin,
    /// Administers a single company.
    CompanyAdmin,
    /// Human-resources staff within a company.
    Hr,
    /// Runs a department within a company.
    Manager,
    /// Regular staff member.
    Employee,
    /// Read-only observer within a company.
    Viewer,
}

/// Role string that matches no known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    /// All roles, most privileged first.
    pub const ALL: [Role; 6] = [
        Role::Superadmin,
        Role::CompanyAdmin,
        Role::Hr,
        Role::Manager,
        Role::Employee,
        Role::Viewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::CompanyAdmin => "company_admin",
            Role::Hr => "hr",
            Role::Manager => "manager",
            Role::Employee => "employee",
            Role::Viewer => "viewer",
        }
    }

    /// Whether the role only means something through a company membership.
    ///
    /// True for everything but `Superadmin`.
    pub fn is_company_scoped(self) -> bool {
        !matches!(self, Role::Superadmin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::Superadmin),
            "company_admin" => Ok(Role::CompanyAdmin),
            "hr" => Ok(Role::Hr),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            "viewer" => Ok(Role::Viewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for role in Role::ALL {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "wizard".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("wizard".to_string()));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::CompanyAdmin).unwrap();
        assert_eq!(json, "\"company_admin\"");
        let back: Role = serde_json::from_str("\"hr\"").unwrap();
        assert_eq!(back, Role::Hr);
    }

    #[test]
    fn only_superadmin_escapes_company_scope() {
        for role in Role::ALL {
            assert_eq!(role.is_company_scoped(), role != Role::Superadmin);
        }
    }
}
