//! Employee profile: a person employed by a company.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tenure_core::{
    CompanyId, DepartmentId, DomainError, DomainResult, EmployeeId, Entity, Slugged, UserId,
};

/// An employee profile.
///
/// # Invariants
/// - Belongs to exactly one company; the company never changes after hire.
/// - At most one profile per user account.
/// - `department_id`, when set, names a department of the same company
///   (enforced at the storage boundary, where both records are visible).
/// - `email` is unique across the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub user_id: UserId,
    pub company_id: CompanyId,
    pub department_id: Option<DepartmentId>,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub designation: String,
    pub hired_on: Option<NaiveDate>,
    pub slug: String,
}

impl Employee {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EmployeeId,
        user_id: UserId,
        company_id: CompanyId,
        department_id: Option<DepartmentId>,
        name: &str,
        email: &str,
        designation: &str,
        slug: String,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            user_id,
            company_id,
            department_id,
            name: valid_name(name)?,
            email: valid_email(email)?,
            phone_number: String::new(),
            address: String::new(),
            designation: designation.trim().to_string(),
            hired_on: None,
            slug,
        })
    }

    /// Days on the books as of `today`. `None` until a hire date is recorded.
    pub fn days_employed(&self, today: NaiveDate) -> Option<i64> {
        self.hired_on.map(|hired| (today - hired).num_days())
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> EmployeeId {
        self.id
    }
}

impl Slugged for Employee {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Partial update; absent fields stay untouched.
///
/// The self-service allow-list check runs against the raw request keys
/// upstream of this type, so a submission is vetted before it is narrowed
/// to the fields a patch can carry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub designation: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub hired_on: Option<NaiveDate>,
}

impl EmployeePatch {
    /// Apply to a profile. Department membership is validated against the
    /// company at the storage boundary, not here.
    pub fn apply(self, employee: &mut Employee) -> DomainResult<()> {
        if let Some(name) = self.name {
            employee.name = valid_name(&name)?;
        }
        if let Some(email) = self.email {
            employee.email = valid_email(&email)?;
        }
        if let Some(phone_number) = self.phone_number {
            employee.phone_number = phone_number.trim().to_string();
        }
        if let Some(address) = self.address {
            employee.address = address.trim().to_string();
        }
        if let Some(designation) = self.designation {
            employee.designation = designation.trim().to_string();
        }
        if let Some(department_id) = self.department_id {
            employee.department_id = Some(department_id);
        }
        if let Some(hired_on) = self.hired_on {
            employee.hired_on = Some(hired_on);
        }
        Ok(())
    }
}

fn valid_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("employee name cannot be empty"));
    }
    Ok(name.to_string())
}

fn valid_email(email: &str) -> DomainResult<String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("invalid email format"));
    }
    Ok(email.to_lowercase())
}
