//! Company: the tenant boundary.

use serde::{Deserialize, Serialize};

use tenure_core::{CompanyId, DomainError, DomainResult, Entity, Slugged};

/// A company.
///
/// # Invariants
/// - `name` is non-empty after trimming and unique across the system.
/// - `slug` is stable once assigned; renames never touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub slug: String,
}

impl Company {
    pub fn new(id: CompanyId, name: &str, slug: String) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: valid_name(name)?,
            slug,
        })
    }
}

impl Entity for Company {
    type Id = CompanyId;

    fn id(&self) -> CompanyId {
        self.id
    }
}

impl Slugged for Company {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Partial update; absent fields stay untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyPatch {
    pub name: Option<String>,
}

impl CompanyPatch {
    pub fn apply(self, company: &mut Company) -> DomainResult<()> {
        if let Some(name) = self.name {
            company.name = valid_name(&name)?;
        }
        Ok(())
    }
}

fn valid_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("company name cannot be empty"));
    }
    Ok(name.to_string())
}
