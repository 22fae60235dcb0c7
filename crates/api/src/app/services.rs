//! Resource services: scope resolution plus policy checks applied to the
//! store. Handlers stay transport-only; everything with a permission or
//! tenant consequence lives here.

use std::sync::Arc;

use tracing::info;

use tenure_auth::{
    ADMIN_GATE, Actor, Decision, Operation, ResourceView, Role, STAFFING_GATE, authorize,
    company_of, department_of, validate_self_update,
};
use tenure_core::{CompanyId, ReviewId};
use tenure_infra::{
    CompanyStore, DepartmentStore, EmployeeStore, InMemoryHrStore, NewCompany, NewDepartment,
    NewEmployee, NewProject, NewReview, ProjectStore, ReviewStore,
};
use tenure_org::{Company, CompanyPatch, Department, DepartmentPatch};
use tenure_projects::{Project, ProjectPatch};
use tenure_reviews::{PerformanceReview, Stage, TransitionEffects, can_transition};
use tenure_workforce::{Employee, EmployeePatch};

use crate::app::dto;
use crate::app::errors::ServiceError;

/// Company enriched with the membership counts the listing endpoints expose.
#[derive(Debug, Clone)]
pub struct CompanyView {
    pub company: Company,
    pub num_departments: usize,
    pub num_employees: usize,
    pub num_projects: usize,
}

#[derive(Debug, Clone)]
pub struct DepartmentView {
    pub department: Department,
    pub num_employees: usize,
    pub num_projects: usize,
}

#[derive(Clone)]
pub struct AppServices {
    store: Arc<InMemoryHrStore>,
}

/// Turn a policy decision into flow control.
fn require(decision: Decision) -> Result<(), ServiceError> {
    if decision.is_allowed() {
        Ok(())
    } else {
        Err(ServiceError::Denied(
            decision.reason.unwrap_or_else(|| "forbidden".to_string()),
        ))
    }
}

/// Company the actor acts within. Unresolved scope reads as foreign to
/// every tenant, hence the denial wording.
fn home_company(actor: &Actor) -> Result<CompanyId, ServiceError> {
    company_of(actor).ok_or_else(|| ServiceError::Denied("Not same company.".to_string()))
}

fn employee_view(employee: &Employee) -> ResourceView {
    ResourceView::Employee {
        id: employee.id,
        company: employee.company_id,
        department: employee.department_id,
    }
}

fn project_view(project: &Project) -> ResourceView {
    ResourceView::Project {
        company: project.company_id,
        department: project.department_id,
    }
}

impl AppServices {
    pub fn new(store: Arc<InMemoryHrStore>) -> Self {
        Self { store }
    }

    // One store, five facets. The accessors keep call sites unambiguous
    // where trait method names overlap.
    fn companies(&self) -> &dyn CompanyStore {
        self.store.as_ref()
    }

    fn departments(&self) -> &dyn DepartmentStore {
        self.store.as_ref()
    }

    fn employees(&self) -> &dyn EmployeeStore {
        self.store.as_ref()
    }

    fn projects(&self) -> &dyn ProjectStore {
        self.store.as_ref()
    }

    fn reviews(&self) -> &dyn ReviewStore {
        self.store.as_ref()
    }

    /// Company a create lands in. Superadmins must name one; everyone else
    /// is pinned to their own regardless of what the payload says.
    fn resolve_target_company(
        &self,
        actor: &Actor,
        company_slug: Option<&str>,
    ) -> Result<CompanyId, ServiceError> {
        if actor.is_superadmin() {
            let slug = company_slug
                .ok_or_else(|| ServiceError::Validation("company is required".to_string()))?;
            return Ok(self.companies().get_by_slug(slug)?.id);
        }
        home_company(actor)
    }

    // -------------------------
    // Companies
    // -------------------------

    fn company_view(&self, company: Company) -> Result<CompanyView, ServiceError> {
        let num_departments = self.departments().list_by_company(company.id)?.len();
        let num_employees = self.employees().list_by_company(company.id)?.len();
        let num_projects = self.projects().list_by_company(company.id)?.len();
        Ok(CompanyView {
            company,
            num_departments,
            num_employees,
            num_projects,
        })
    }

    pub fn list_companies(&self, actor: &Actor) -> Result<Vec<CompanyView>, ServiceError> {
        let companies = if actor.is_superadmin() {
            self.companies().list()?
        } else {
            match company_of(actor) {
                Some(home) => vec![self.companies().get(home)?],
                None => Vec::new(),
            }
        };
        companies
            .into_iter()
            .map(|company| self.company_view(company))
            .collect()
    }

    pub fn get_company(&self, actor: &Actor, slug: &str) -> Result<CompanyView, ServiceError> {
        let company = self.companies().get_by_slug(slug)?;
        require(authorize(
            actor,
            Operation::Read,
            &ResourceView::Company { id: company.id },
        ))?;
        self.company_view(company)
    }

    pub fn create_company(
        &self,
        actor: &Actor,
        req: dto::CreateCompanyRequest,
    ) -> Result<CompanyView, ServiceError> {
        if !ADMIN_GATE.permits(actor) {
            return Err(ServiceError::Denied(
                "Only a company admin can modify companies.".to_string(),
            ));
        }
        let company = self.companies().create(NewCompany {
            name: req.name,
            slug: req.slug,
        })?;
        info!(company = %company.id, slug = %company.slug, "company created");
        self.company_view(company)
    }

    pub fn update_company(
        &self,
        actor: &Actor,
        slug: &str,
        req: dto::UpdateCompanyRequest,
    ) -> Result<CompanyView, ServiceError> {
        let company = self.companies().get_by_slug(slug)?;
        require(authorize(
            actor,
            Operation::Write,
            &ResourceView::Company { id: company.id },
        ))?;
        let company = self
            .companies()
            .update(company.id, CompanyPatch { name: req.name })?;
        info!(company = %company.id, "company updated");
        self.company_view(company)
    }

    pub fn delete_company(&self, actor: &Actor, slug: &str) -> Result<(), ServiceError> {
        let company = self.companies().get_by_slug(slug)?;
        require(authorize(
            actor,
            Operation::Delete,
            &ResourceView::Company { id: company.id },
        ))?;
        self.companies().delete(company.id)?;
        info!(company = %company.id, "company deleted");
        Ok(())
    }

    // -------------------------
    // Departments
    // -------------------------

    fn department_view(&self, department: Department) -> Result<DepartmentView, ServiceError> {
        let num_employees = self
            .employees()
            .list_by_department(department.company_id, Some(department.id))?
            .len();
        let num_projects = self
            .projects()
            .list_by_company(department.company_id)?
            .into_iter()
            .filter(|project| project.department_id == Some(department.id))
            .count();
        Ok(DepartmentView {
            department,
            num_employees,
            num_projects,
        })
    }

    pub fn list_departments(
        &self,
        actor: &Actor,
        company_slug: &str,
    ) -> Result<Vec<DepartmentView>, ServiceError> {
        let company = self.companies().get_by_slug(company_slug)?;
        require(authorize(
            actor,
            Operation::Read,
            &ResourceView::Department {
                company: company.id,
            },
        ))?;
        self.departments()
            .list_by_company(company.id)?
            .into_iter()
            .map(|department| self.department_view(department))
            .collect()
    }

    pub fn get_department(
        &self,
        actor: &Actor,
        company_slug: &str,
        department_slug: &str,
    ) -> Result<DepartmentView, ServiceError> {
        let company = self.companies().get_by_slug(company_slug)?;
        let department = self.departments().get_by_slug(company.id, department_slug)?;
        require(authorize(
            actor,
            Operation::Read,
            &ResourceView::Department {
                company: company.id,
            },
        ))?;
        self.department_view(department)
    }

    pub fn create_department(
        &self,
        actor: &Actor,
        company_slug: &str,
        req: dto::CreateDepartmentRequest,
    ) -> Result<DepartmentView, ServiceError> {
        let company = self.companies().get_by_slug(company_slug)?;
        require(authorize(
            actor,
            Operation::Write,
            &ResourceView::Department {
                company: company.id,
            },
        ))?;
        let department = self.departments().create(NewDepartment {
            company_id: company.id,
            name: req.name,
            slug: req.slug,
        })?;
        info!(department = %department.id, company = %company.id, "department created");
        self.department_view(department)
    }

    pub fn update_department(
        &self,
        actor: &Actor,
        company_slug: &str,
        department_slug: &str,
        req: dto::UpdateDepartmentRequest,
    ) -> Result<DepartmentView, ServiceError> {
        let company = self.companies().get_by_slug(company_slug)?;
        let department = self.departments().get_by_slug(company.id, department_slug)?;
        require(authorize(
            actor,
            Operation::Write,
            &ResourceView::Department {
                company: company.id,
            },
        ))?;
        let department = self
            .departments()
            .update(department.id, DepartmentPatch { name: req.name })?;
        info!(department = %department.id, "department updated");
        self.department_view(department)
    }

    pub fn delete_department(
        &self,
        actor: &Actor,
        company_slug: &str,
        department_slug: &str,
    ) -> Result<(), ServiceError> {
        let company = self.companies().get_by_slug(company_slug)?;
        let department = self.departments().get_by_slug(company.id, department_slug)?;
        require(authorize(
            actor,
            Operation::Delete,
            &ResourceView::Department {
                company: company.id,
            },
        ))?;
        self.departments().delete(department.id)?;
        info!(department = %department.id, "department deleted");
        Ok(())
    }

    // -------------------------
    // Employees
    // -------------------------

    pub fn list_employees(&self, actor: &Actor) -> Result<Vec<Employee>, ServiceError> {
        // The operator flag widens any role to the full listing.
        if actor.is_superuser {
            return Ok(self.employees().list()?);
        }
        match actor.role {
            Role::Superadmin => Ok(self.employees().list()?),
            Role::CompanyAdmin | Role::Hr => {
                Ok(self.employees().list_by_company(home_company(actor)?)?)
            }
            Role::Manager => Ok(self
                .employees()
                .list_by_department(home_company(actor)?, department_of(actor))?),
            Role::Employee | Role::Viewer => {
                Err(ServiceError::Denied("Not allowed.".to_string()))
            }
        }
    }

    pub fn get_employee(&self, actor: &Actor, slug: &str) -> Result<Employee, ServiceError> {
        let employee = self.employees().get_by_slug(slug)?;
        require(authorize(actor, Operation::Read, &employee_view(&employee)))?;
        Ok(employee)
    }

    pub fn create_employee(
        &self,
        actor: &Actor,
        req: dto::CreateEmployeeRequest,
    ) -> Result<Employee, ServiceError> {
        if !STAFFING_GATE.permits(actor) {
            return Err(ServiceError::Denied(
                "Not allowed to create employee.".to_string(),
            ));
        }
        let company_id = self.resolve_target_company(actor, req.company_slug.as_deref())?;
        let employee = self.employees().create(NewEmployee {
            user_id: req.user_id,
            company_id,
            department_id: req.department_id,
            name: req.name,
            email: req.email,
            designation: req.designation,
            phone_number: req.phone_number,
            address: req.address,
            hired_on: req.hired_on,
            slug: req.slug,
        })?;
        info!(employee = %employee.id, company = %company_id, "employee created");
        Ok(employee)
    }

    pub fn update_employee(
        &self,
        actor: &Actor,
        slug: &str,
        body: serde_json::Value,
    ) -> Result<Employee, ServiceError> {
        let employee = self.employees().get_by_slug(slug)?;

        // Self-service updates are field-checked against the raw payload
        // before the policy check, so a forbidden field names itself instead
        // of surfacing as a generic denial.
        let self_service = actor.role == Role::Employee
            && !actor.is_superadmin()
            && actor.employee_id() == Some(employee.id);
        if self_service {
            let submitted: Vec<&str> = body
                .as_object()
                .map(|map| map.keys().map(String::as_str).collect())
                .unwrap_or_default();
            validate_self_update(submitted)
                .map_err(|violation| ServiceError::Denied(violation.to_string()))?;
        }
        require(authorize(actor, Operation::Write, &employee_view(&employee)))?;

        let patch: EmployeePatch = serde_json::from_value(body)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        let updated = self.employees().update(employee.id, patch)?;
        info!(employee = %updated.id, "employee updated");
        Ok(updated)
    }

    pub fn delete_employee(&self, actor: &Actor, slug: &str) -> Result<(), ServiceError> {
        let employee = self.employees().get_by_slug(slug)?;
        require(authorize(actor, Operation::Delete, &employee_view(&employee)))?;
        self.employees().delete(employee.id)?;
        info!(employee = %employee.id, "employee deleted");
        Ok(())
    }

    pub fn list_employee_reviews(
        &self,
        actor: &Actor,
        slug: &str,
    ) -> Result<Vec<PerformanceReview>, ServiceError> {
        let employee = self.employees().get_by_slug(slug)?;
        require(authorize(
            actor,
            Operation::Read,
            &ResourceView::Review {
                company: employee.company_id,
            },
        ))?;
        Ok(self.reviews().list_by_employee(employee.id)?)
    }

    // -------------------------
    // Projects
    // -------------------------

    pub fn list_projects(&self, actor: &Actor) -> Result<Vec<Project>, ServiceError> {
        if actor.is_superadmin() {
            return Ok(self.projects().list()?);
        }
        match company_of(actor) {
            Some(home) => Ok(self.projects().list_by_company(home)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_project(&self, actor: &Actor, slug: &str) -> Result<Project, ServiceError> {
        let project = self.projects().get_by_slug(slug)?;
        require(authorize(actor, Operation::Read, &project_view(&project)))?;
        Ok(project)
    }

    pub fn create_project(
        &self,
        actor: &Actor,
        req: dto::CreateProjectRequest,
    ) -> Result<Project, ServiceError> {
        let company_id = self.resolve_target_company(actor, req.company_slug.as_deref())?;
        require(authorize(
            actor,
            Operation::Write,
            &ResourceView::Project {
                company: company_id,
                department: req.department_id,
            },
        ))?;
        let project = self.projects().create(NewProject {
            company_id,
            department_id: req.department_id,
            name: req.name,
            description: req.description.unwrap_or_default(),
            start_date: req.start_date,
            end_date: req.end_date,
            assigned_employees: req.assigned_employees.unwrap_or_default(),
            slug: req.slug,
        })?;
        info!(project = %project.id, company = %company_id, "project created");
        Ok(project)
    }

    pub fn update_project(
        &self,
        actor: &Actor,
        slug: &str,
        req: dto::UpdateProjectRequest,
    ) -> Result<Project, ServiceError> {
        let project = self.projects().get_by_slug(slug)?;
        // Managers are judged against the project's current department, not
        // the one the patch may move it to.
        require(authorize(actor, Operation::Write, &project_view(&project)))?;
        let updated = self.projects().update(
            project.id,
            ProjectPatch {
                name: req.name,
                description: req.description,
                department_id: req.department_id,
                start_date: req.start_date,
                end_date: req.end_date,
                assigned_employees: req.assigned_employees,
            },
        )?;
        info!(project = %updated.id, "project updated");
        Ok(updated)
    }

    pub fn delete_project(&self, actor: &Actor, slug: &str) -> Result<(), ServiceError> {
        let project = self.projects().get_by_slug(slug)?;
        require(authorize(actor, Operation::Delete, &project_view(&project)))?;
        self.projects().delete(project.id)?;
        info!(project = %project.id, "project deleted");
        Ok(())
    }

    // -------------------------
    // Reviews
    // -------------------------

    pub fn create_review(
        &self,
        actor: &Actor,
        req: dto::CreateReviewRequest,
    ) -> Result<PerformanceReview, ServiceError> {
        let subject = self.employees().get(req.employee_id)?;
        require(authorize(
            actor,
            Operation::Write,
            &ResourceView::Review {
                company: subject.company_id,
            },
        ))?;
        let review = self.reviews().create(NewReview {
            employee_id: req.employee_id,
            reviewer_id: req.reviewer_id,
            manager_id: req.manager_id,
        })?;
        info!(review = %review.id, employee = %review.employee_id, "review created");
        Ok(review)
    }

    pub fn get_review(
        &self,
        actor: &Actor,
        id: ReviewId,
    ) -> Result<PerformanceReview, ServiceError> {
        let review = self.reviews().get(id)?;
        let subject = self.employees().get(review.employee_id)?;
        require(authorize(
            actor,
            Operation::Read,
            &ResourceView::Review {
                company: subject.company_id,
            },
        ))?;
        Ok(review)
    }

    pub fn transition_review(
        &self,
        actor: &Actor,
        id: ReviewId,
        req: dto::TransitionRequest,
    ) -> Result<PerformanceReview, ServiceError> {
        let review = self.reviews().get(id)?;
        let subject = self.employees().get(review.employee_id)?;

        let target = req
            .target_stage
            .ok_or_else(|| ServiceError::Validation("target_stage is required".to_string()))?;

        require(can_transition(actor, &review, subject.company_id, &target))?;

        // The role gate accepted the stage name; reachability from the
        // current stage is a separate question.
        let target: Stage = target
            .parse()
            .map_err(|_| ServiceError::Denied("Unknown target stage.".to_string()))?;
        if !review.stage.can_advance_to(target) {
            return Err(ServiceError::Denied(format!(
                "Stage {target} is not reachable from {current}.",
                current = review.stage
            )));
        }

        let updated = self.reviews().transition(
            id,
            target,
            TransitionEffects {
                feedback: req.feedback,
                scheduled_date: req.scheduled_date,
            },
        )?;
        info!(review = %id, stage = %updated.stage, "review stage moved");
        Ok(updated)
    }

    pub fn delete_review(&self, actor: &Actor, id: ReviewId) -> Result<(), ServiceError> {
        let review = self.reviews().get(id)?;
        let subject = self.employees().get(review.employee_id)?;
        require(authorize(
            actor,
            Operation::Delete,
            &ResourceView::Review {
                company: subject.company_id,
            },
        ))?;
        self.reviews().delete(id)?;
        info!(review = %id, "review deleted");
        Ok(())
    }
}
