//! Storage boundary for the HR domain.
//!
//! One trait per resource kind, sized for what the services actually call:
//! create with optional slug, fetch by id or slug, scoped listings, partial
//! update, delete. Implementations own atomicity: each call observes or
//! produces one consistent state, and racing updates resolve to last write
//! wins.

pub mod in_memory;

pub use in_memory::InMemoryHrStore;

use chrono::NaiveDate;
use thiserror::Error;

use tenure_core::{CompanyId, DepartmentId, DomainError, EmployeeId, ProjectId, ReviewId, UserId};
use tenure_org::{Company, CompanyPatch, Department, DepartmentPatch};
use tenure_projects::{Project, ProjectPatch};
use tenure_reviews::{PerformanceReview, Stage, TransitionEffects};
use tenure_workforce::{Employee, EmployeePatch};

/// Storage-level failure.
///
/// `NotFound` is deliberately separate from policy denials so callers can
/// choose between a 404 and a 403 without guessing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// A uniqueness or referential rule was violated.
    #[error("{0}")]
    Conflict(String),

    /// The record-level validation failed.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// The backend itself failed (poisoned locks and the like).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Creation records
// ─────────────────────────────────────────────────────────────────────────────

/// Input for a new company. `slug: None` asks the store to assign one.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewDepartment {
    pub company_id: CompanyId,
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub user_id: UserId,
    pub company_id: CompanyId,
    pub department_id: Option<DepartmentId>,
    pub name: String,
    pub email: String,
    pub designation: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub hired_on: Option<NaiveDate>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub company_id: CompanyId,
    pub department_id: Option<DepartmentId>,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub assigned_employees: Vec<EmployeeId>,
    pub slug: Option<String>,
}

/// Input for a new review. The stage is not a parameter: reviews are born
/// `PENDING` regardless of what any payload claims.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub employee_id: EmployeeId,
    pub reviewer_id: Option<EmployeeId>,
    pub manager_id: Option<EmployeeId>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Store traits
// ─────────────────────────────────────────────────────────────────────────────

pub trait CompanyStore: Send + Sync {
    fn create(&self, new: NewCompany) -> StoreResult<Company>;
    fn get(&self, id: CompanyId) -> StoreResult<Company>;
    fn get_by_slug(&self, slug: &str) -> StoreResult<Company>;
    fn list(&self) -> StoreResult<Vec<Company>>;
    fn update(&self, id: CompanyId, patch: CompanyPatch) -> StoreResult<Company>;
    /// Removes the company and, with it, every department, employee,
    /// project, and review under it.
    fn delete(&self, id: CompanyId) -> StoreResult<()>;
}

pub trait DepartmentStore: Send + Sync {
    fn create(&self, new: NewDepartment) -> StoreResult<Department>;
    fn get(&self, id: DepartmentId) -> StoreResult<Department>;
    /// Slug lookup scoped to one company: a department is only addressable
    /// underneath its owner.
    fn get_by_slug(&self, company: CompanyId, slug: &str) -> StoreResult<Department>;
    fn list_by_company(&self, company: CompanyId) -> StoreResult<Vec<Department>>;
    fn update(&self, id: DepartmentId, patch: DepartmentPatch) -> StoreResult<Department>;
    /// Removes the department; members and projects fall back to
    /// department-less rather than disappearing.
    fn delete(&self, id: DepartmentId) -> StoreResult<()>;
}

pub trait EmployeeStore: Send + Sync {
    fn create(&self, new: NewEmployee) -> StoreResult<Employee>;
    fn get(&self, id: EmployeeId) -> StoreResult<Employee>;
    fn get_by_slug(&self, slug: &str) -> StoreResult<Employee>;
    /// Profile lookup by account. Absence is an expected state, not an
    /// error: plenty of accounts have no profile yet.
    fn find_by_user(&self, user: UserId) -> StoreResult<Option<Employee>>;
    fn list(&self) -> StoreResult<Vec<Employee>>;
    fn list_by_company(&self, company: CompanyId) -> StoreResult<Vec<Employee>>;
    /// Department-scoped listing. `department: None` means employees with
    /// no department, which is how department-less managers see the world.
    fn list_by_department(
        &self,
        company: CompanyId,
        department: Option<DepartmentId>,
    ) -> StoreResult<Vec<Employee>>;
    fn update(&self, id: EmployeeId, patch: EmployeePatch) -> StoreResult<Employee>;
    /// Removes the profile, cascades its reviews, clears it from project
    /// rosters and from reviewer/manager seats.
    fn delete(&self, id: EmployeeId) -> StoreResult<()>;
}

pub trait ProjectStore: Send + Sync {
    fn create(&self, new: NewProject) -> StoreResult<Project>;
    fn get(&self, id: ProjectId) -> StoreResult<Project>;
    fn get_by_slug(&self, slug: &str) -> StoreResult<Project>;
    fn list(&self) -> StoreResult<Vec<Project>>;
    fn list_by_company(&self, company: CompanyId) -> StoreResult<Vec<Project>>;
    fn update(&self, id: ProjectId, patch: ProjectPatch) -> StoreResult<Project>;
    fn delete(&self, id: ProjectId) -> StoreResult<()>;
}

pub trait ReviewStore: Send + Sync {
    fn create(&self, new: NewReview) -> StoreResult<PerformanceReview>;
    fn get(&self, id: ReviewId) -> StoreResult<PerformanceReview>;
    fn list_by_employee(&self, employee: EmployeeId) -> StoreResult<Vec<PerformanceReview>>;
    /// Commit a stage move plus its side effects as one write.
    fn transition(
        &self,
        id: ReviewId,
        target: Stage,
        effects: TransitionEffects,
    ) -> StoreResult<PerformanceReview>;
    fn delete(&self, id: ReviewId) -> StoreResult<()>;
}
