//! Department: a unit within a single company.

use serde::{Deserialize, Serialize};

use tenure_core::{CompanyId, DepartmentId, DomainError, DomainResult, Entity, Slugged};

/// A department.
///
/// # Invariants
/// - Belongs to exactly one company for its whole lifetime.
/// - `name` is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub company_id: CompanyId,
    pub name: String,
    pub slug: String,
}

impl Department {
    pub fn new(
        id: DepartmentId,
        company_id: CompanyId,
        name: &str,
        slug: String,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            company_id,
            name: valid_name(name)?,
            slug,
        })
    }
}

impl Entity for Department {
    type Id = DepartmentId;

    fn id(&self) -> DepartmentId {
        self.id
    }
}

impl Slugged for Department {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Partial update; absent fields stay untouched. The owning company is not
/// patchable, departments never move between tenants.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentPatch {
    pub name: Option<String>,
}

impl DepartmentPatch {
    pub fn apply(self, department: &mut Department) -> DomainResult<()> {
        if let Some(name) = self.name {
            department.name = valid_name(&name)?;
        }
        Ok(())
    }
}

fn valid_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("department name cannot be empty"));
    }
    Ok(name.to_string())
}
