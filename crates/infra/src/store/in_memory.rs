//! In-memory store backing dev servers and the test suites.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use tenure_core::{
    CompanyId, DepartmentId, DomainError, EmployeeId, Entity, ProjectId, ReviewId, Slugged, UserId,
};
use tenure_org::{Company, CompanyPatch, Department, DepartmentPatch};
use tenure_projects::{Project, ProjectPatch};
use tenure_reviews::{PerformanceReview, Stage, TransitionEffects};
use tenure_workforce::{Employee, EmployeePatch};

use crate::slug::{DEFAULT_SLUG_ATTEMPTS, generate_slug};

use super::{
    CompanyStore, DepartmentStore, EmployeeStore, NewCompany, NewDepartment, NewEmployee,
    NewProject, NewReview, ProjectStore, ReviewStore, StoreError, StoreResult,
};

#[derive(Debug, Default)]
struct HrState {
    companies: HashMap<CompanyId, Company>,
    departments: HashMap<DepartmentId, Department>,
    employees: HashMap<EmployeeId, Employee>,
    projects: HashMap<ProjectId, Project>,
    reviews: HashMap<ReviewId, PerformanceReview>,
}

/// Whole-domain in-memory store.
///
/// One lock guards the full state, so every trait call is atomic: checks,
/// slug assignment, and the write itself happen under the same guard.
/// Racing updates to one record resolve to last write wins.
///
/// Not optimized for large data sets; lookups scan.
#[derive(Debug, Default)]
pub struct InMemoryHrStore {
    state: RwLock<HrState>,
}

impl InMemoryHrStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HrState>> {
        self.state
            .read()
            .map_err(|_| StoreError::Unavailable("state lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HrState>> {
        self.state
            .write()
            .map_err(|_| StoreError::Unavailable("state lock poisoned".to_string()))
    }
}

/// Resolve the slug for a new record: validate a supplied one against the
/// occupancy check, or draw a fresh one. Runs under the caller's write
/// guard, which is what makes the uniqueness check good through commit.
fn resolve_slug<F>(supplied: Option<String>, mut taken: F) -> StoreResult<String>
where
    F: FnMut(&str) -> bool,
{
    match supplied {
        Some(slug) => {
            let slug = slug.trim().to_string();
            if slug.is_empty() {
                return Err(StoreError::Invalid(DomainError::validation(
                    "slug cannot be empty",
                )));
            }
            if taken(&slug) {
                return Err(StoreError::Conflict(format!("slug '{slug}' already in use")));
            }
            Ok(slug)
        }
        None => generate_slug(&mut rand::thread_rng(), taken, DEFAULT_SLUG_ATTEMPTS)
            .map_err(|e| StoreError::Unavailable(e.to_string())),
    }
}

fn find_by_slug<'a, E, I>(mut iter: I, slug: &str) -> StoreResult<E>
where
    E: Slugged + Clone + 'a,
    I: Iterator<Item = &'a E>,
{
    iter.find(|e| e.slug() == slug)
        .cloned()
        .ok_or(StoreError::NotFound)
}

/// Clone into a vec ordered by id. Ids are time-ordered, so this is
/// creation order.
fn sorted_by_id<'a, E, I>(iter: I) -> Vec<E>
where
    E: Entity + Clone + 'a,
    E::Id: Ord,
    I: Iterator<Item = &'a E>,
{
    let mut items: Vec<E> = iter.cloned().collect();
    items.sort_by_key(|e| e.id());
    items
}

/// Drop reviews whose subject is gone and vacate reviewer/manager seats
/// held by removed employees.
fn prune_reviews(reviews: &mut HashMap<ReviewId, PerformanceReview>, removed: &HashSet<EmployeeId>) {
    reviews.retain(|_, r| !removed.contains(&r.employee_id));
    for review in reviews.values_mut() {
        if review.reviewer_id.is_some_and(|id| removed.contains(&id)) {
            review.reviewer_id = None;
        }
        if review.manager_id.is_some_and(|id| removed.contains(&id)) {
            review.manager_id = None;
        }
    }
}

fn check_department_in_company(
    state: &HrState,
    company: CompanyId,
    department: DepartmentId,
) -> StoreResult<()> {
    let dept = state
        .departments
        .get(&department)
        .ok_or_else(|| StoreError::Invalid(DomainError::validation("unknown department")))?;
    if dept.company_id != company {
        return Err(StoreError::Invalid(DomainError::validation(
            "department belongs to a different company",
        )));
    }
    Ok(())
}

fn check_crew_in_company(
    state: &HrState,
    company: CompanyId,
    crew: &[EmployeeId],
) -> StoreResult<()> {
    for member in crew {
        let employee = state
            .employees
            .get(member)
            .ok_or_else(|| StoreError::Invalid(DomainError::validation("unknown employee")))?;
        if employee.company_id != company {
            return Err(StoreError::Invalid(DomainError::validation(
                "assigned employee belongs to a different company",
            )));
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Companies
// ─────────────────────────────────────────────────────────────────────────────

impl CompanyStore for InMemoryHrStore {
    fn create(&self, new: NewCompany) -> StoreResult<Company> {
        let mut state = self.write()?;
        if state.companies.values().any(|c| c.name == new.name.trim()) {
            return Err(StoreError::Conflict("company name already in use".to_string()));
        }
        let slug = resolve_slug(new.slug, |s| state.companies.values().any(|c| c.slug == s))?;
        let company = Company::new(CompanyId::new(), &new.name, slug)?;
        state.companies.insert(company.id, company.clone());
        Ok(company)
    }

    fn get(&self, id: CompanyId) -> StoreResult<Company> {
        let state = self.read()?;
        state.companies.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn get_by_slug(&self, slug: &str) -> StoreResult<Company> {
        let state = self.read()?;
        find_by_slug(state.companies.values(), slug)
    }

    fn list(&self) -> StoreResult<Vec<Company>> {
        let state = self.read()?;
        Ok(sorted_by_id(state.companies.values()))
    }

    fn update(&self, id: CompanyId, patch: CompanyPatch) -> StoreResult<Company> {
        let mut state = self.write()?;
        let mut updated = state.companies.get(&id).cloned().ok_or(StoreError::NotFound)?;
        patch.apply(&mut updated)?;
        if state
            .companies
            .values()
            .any(|c| c.id != id && c.name == updated.name)
        {
            return Err(StoreError::Conflict("company name already in use".to_string()));
        }
        state.companies.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete(&self, id: CompanyId) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.companies.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        state.departments.retain(|_, d| d.company_id != id);
        let removed: HashSet<EmployeeId> = state
            .employees
            .values()
            .filter(|e| e.company_id == id)
            .map(|e| e.id)
            .collect();
        state.employees.retain(|_, e| e.company_id != id);
        state.projects.retain(|_, p| p.company_id != id);
        prune_reviews(&mut state.reviews, &removed);
        debug!(company = %id, employees = removed.len(), "company delete cascaded");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Departments
// ─────────────────────────────────────────────────────────────────────────────

impl DepartmentStore for InMemoryHrStore {
    fn create(&self, new: NewDepartment) -> StoreResult<Department> {
        let mut state = self.write()?;
        if !state.companies.contains_key(&new.company_id) {
            return Err(StoreError::NotFound);
        }
        let slug = resolve_slug(new.slug, |s| state.departments.values().any(|d| d.slug == s))?;
        let department = Department::new(DepartmentId::new(), new.company_id, &new.name, slug)?;
        state.departments.insert(department.id, department.clone());
        Ok(department)
    }

    fn get(&self, id: DepartmentId) -> StoreResult<Department> {
        let state = self.read()?;
        state.departments.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn get_by_slug(&self, company: CompanyId, slug: &str) -> StoreResult<Department> {
        let state = self.read()?;
        state
            .departments
            .values()
            .find(|d| d.company_id == company && d.slug == slug)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn list_by_company(&self, company: CompanyId) -> StoreResult<Vec<Department>> {
        let state = self.read()?;
        Ok(sorted_by_id(
            state.departments.values().filter(|d| d.company_id == company),
        ))
    }

    fn update(&self, id: DepartmentId, patch: DepartmentPatch) -> StoreResult<Department> {
        let mut state = self.write()?;
        let mut updated = state
            .departments
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        patch.apply(&mut updated)?;
        state.departments.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete(&self, id: DepartmentId) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.departments.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        for employee in state.employees.values_mut() {
            if employee.department_id == Some(id) {
                employee.department_id = None;
            }
        }
        for project in state.projects.values_mut() {
            if project.department_id == Some(id) {
                project.department_id = None;
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Employees
// ─────────────────────────────────────────────────────────────────────────────

impl EmployeeStore for InMemoryHrStore {
    fn create(&self, new: NewEmployee) -> StoreResult<Employee> {
        let mut state = self.write()?;
        if !state.companies.contains_key(&new.company_id) {
            return Err(StoreError::NotFound);
        }
        if let Some(department) = new.department_id {
            check_department_in_company(&state, new.company_id, department)?;
        }
        if state.employees.values().any(|e| e.user_id == new.user_id) {
            return Err(StoreError::Conflict(
                "This user already has an employee profile.".to_string(),
            ));
        }

        let slug = resolve_slug(new.slug, |s| state.employees.values().any(|e| e.slug == s))?;
        let mut employee = Employee::new(
            EmployeeId::new(),
            new.user_id,
            new.company_id,
            new.department_id,
            &new.name,
            &new.email,
            &new.designation,
            slug,
        )?;
        if let Some(phone_number) = new.phone_number {
            employee.phone_number = phone_number.trim().to_string();
        }
        if let Some(address) = new.address {
            employee.address = address.trim().to_string();
        }
        employee.hired_on = new.hired_on;

        if state.employees.values().any(|e| e.email == employee.email) {
            return Err(StoreError::Conflict("email already in use".to_string()));
        }
        state.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    fn get(&self, id: EmployeeId) -> StoreResult<Employee> {
        let state = self.read()?;
        state.employees.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn get_by_slug(&self, slug: &str) -> StoreResult<Employee> {
        let state = self.read()?;
        find_by_slug(state.employees.values(), slug)
    }

    fn find_by_user(&self, user: UserId) -> StoreResult<Option<Employee>> {
        let state = self.read()?;
        Ok(state.employees.values().find(|e| e.user_id == user).cloned())
    }

    fn list(&self) -> StoreResult<Vec<Employee>> {
        let state = self.read()?;
        Ok(sorted_by_id(state.employees.values()))
    }

    fn list_by_company(&self, company: CompanyId) -> StoreResult<Vec<Employee>> {
        let state = self.read()?;
        Ok(sorted_by_id(
            state.employees.values().filter(|e| e.company_id == company),
        ))
    }

    fn list_by_department(
        &self,
        company: CompanyId,
        department: Option<DepartmentId>,
    ) -> StoreResult<Vec<Employee>> {
        let state = self.read()?;
        Ok(sorted_by_id(
            state
                .employees
                .values()
                .filter(|e| e.company_id == company && e.department_id == department),
        ))
    }

    fn update(&self, id: EmployeeId, patch: EmployeePatch) -> StoreResult<Employee> {
        let mut state = self.write()?;
        let mut updated = state.employees.get(&id).cloned().ok_or(StoreError::NotFound)?;
        if let Some(department) = patch.department_id {
            check_department_in_company(&state, updated.company_id, department)?;
        }
        patch.apply(&mut updated)?;
        if state
            .employees
            .values()
            .any(|e| e.id != id && e.email == updated.email)
        {
            return Err(StoreError::Conflict("email already in use".to_string()));
        }
        state.employees.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete(&self, id: EmployeeId) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.employees.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        let removed = HashSet::from([id]);
        prune_reviews(&mut state.reviews, &removed);
        for project in state.projects.values_mut() {
            project.assigned_employees.retain(|member| *member != id);
        }
        debug!(employee = %id, "employee delete cascaded to reviews and rosters");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Projects
// ─────────────────────────────────────────────────────────────────────────────

impl ProjectStore for InMemoryHrStore {
    fn create(&self, new: NewProject) -> StoreResult<Project> {
        let mut state = self.write()?;
        if !state.companies.contains_key(&new.company_id) {
            return Err(StoreError::NotFound);
        }
        if let Some(department) = new.department_id {
            check_department_in_company(&state, new.company_id, department)?;
        }
        check_crew_in_company(&state, new.company_id, &new.assigned_employees)?;

        let slug = resolve_slug(new.slug, |s| state.projects.values().any(|p| p.slug == s))?;
        let mut project = Project::new(
            ProjectId::new(),
            new.company_id,
            new.department_id,
            &new.name,
            &new.description,
            new.start_date,
            new.end_date,
            slug,
        )?;
        project.assigned_employees = new.assigned_employees;
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    fn get(&self, id: ProjectId) -> StoreResult<Project> {
        let state = self.read()?;
        state.projects.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn get_by_slug(&self, slug: &str) -> StoreResult<Project> {
        let state = self.read()?;
        find_by_slug(state.projects.values(), slug)
    }

    fn list(&self) -> StoreResult<Vec<Project>> {
        let state = self.read()?;
        Ok(sorted_by_id(state.projects.values()))
    }

    fn list_by_company(&self, company: CompanyId) -> StoreResult<Vec<Project>> {
        let state = self.read()?;
        Ok(sorted_by_id(
            state.projects.values().filter(|p| p.company_id == company),
        ))
    }

    fn update(&self, id: ProjectId, patch: ProjectPatch) -> StoreResult<Project> {
        let mut state = self.write()?;
        let mut updated = state.projects.get(&id).cloned().ok_or(StoreError::NotFound)?;
        if let Some(department) = patch.department_id {
            check_department_in_company(&state, updated.company_id, department)?;
        }
        if let Some(crew) = &patch.assigned_employees {
            check_crew_in_company(&state, updated.company_id, crew)?;
        }
        patch.apply(&mut updated)?;
        state.projects.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete(&self, id: ProjectId) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.projects.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reviews
// ─────────────────────────────────────────────────────────────────────────────

impl ReviewStore for InMemoryHrStore {
    fn create(&self, new: NewReview) -> StoreResult<PerformanceReview> {
        let mut state = self.write()?;
        let subject_company = state
            .employees
            .get(&new.employee_id)
            .ok_or(StoreError::NotFound)?
            .company_id;
        for (seat, holder) in [("reviewer", new.reviewer_id), ("manager", new.manager_id)] {
            if let Some(holder) = holder {
                let colleague = state.employees.get(&holder).ok_or_else(|| {
                    StoreError::Invalid(DomainError::validation(format!("unknown {seat}")))
                })?;
                if colleague.company_id != subject_company {
                    return Err(StoreError::Invalid(DomainError::validation(format!(
                        "{seat} belongs to a different company"
                    ))));
                }
            }
        }
        let review = PerformanceReview::new(
            ReviewId::new(),
            new.employee_id,
            new.reviewer_id,
            new.manager_id,
            Utc::now(),
        );
        state.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    fn get(&self, id: ReviewId) -> StoreResult<PerformanceReview> {
        let state = self.read()?;
        state.reviews.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn list_by_employee(&self, employee: EmployeeId) -> StoreResult<Vec<PerformanceReview>> {
        let state = self.read()?;
        Ok(sorted_by_id(
            state.reviews.values().filter(|r| r.employee_id == employee),
        ))
    }

    fn transition(
        &self,
        id: ReviewId,
        target: Stage,
        effects: TransitionEffects,
    ) -> StoreResult<PerformanceReview> {
        let mut state = self.write()?;
        let review = state.reviews.get_mut(&id).ok_or(StoreError::NotFound)?;
        review.apply_transition(target, effects, Utc::now());
        Ok(review.clone())
    }

    fn delete(&self, id: ReviewId) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.reviews.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
