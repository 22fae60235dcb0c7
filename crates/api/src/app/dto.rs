use chrono::NaiveDate;
use serde::Deserialize;

use tenure_core::{DepartmentId, EmployeeId, UserId};
use tenure_projects::Project;
use tenure_reviews::PerformanceReview;
use tenure_workforce::Employee;

use crate::app::services::{CompanyView, DepartmentView};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
}

/// Employee creation payload. `company_slug` is only honored for superadmins;
/// everyone else creates inside their own company.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub designation: String,
    pub company_slug: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub hired_on: Option<NaiveDate>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub company_slug: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub assigned_employees: Option<Vec<EmployeeId>>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assigned_employees: Option<Vec<EmployeeId>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub employee_id: EmployeeId,
    pub reviewer_id: Option<EmployeeId>,
    pub manager_id: Option<EmployeeId>,
}

/// Transition payload. `feedback` and `scheduled_date` only overwrite the
/// stored values when present.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub target_stage: Option<String>,
    pub feedback: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn company_to_json(view: CompanyView) -> serde_json::Value {
    serde_json::json!({
        "id": view.company.id,
        "name": view.company.name,
        "slug": view.company.slug,
        "num_departments": view.num_departments,
        "num_employees": view.num_employees,
        "num_projects": view.num_projects,
    })
}

pub fn department_to_json(view: DepartmentView) -> serde_json::Value {
    serde_json::json!({
        "id": view.department.id,
        "company_id": view.department.company_id,
        "name": view.department.name,
        "slug": view.department.slug,
        "num_employees": view.num_employees,
        "num_projects": view.num_projects,
    })
}

pub fn employee_to_json(employee: Employee, today: NaiveDate) -> serde_json::Value {
    let days_employed = employee.days_employed(today);
    serde_json::json!({
        "id": employee.id,
        "user_id": employee.user_id,
        "company_id": employee.company_id,
        "department_id": employee.department_id,
        "name": employee.name,
        "email": employee.email,
        "phone_number": employee.phone_number,
        "address": employee.address,
        "designation": employee.designation,
        "hired_on": employee.hired_on,
        "days_employed": days_employed,
        "slug": employee.slug,
    })
}

pub fn project_to_json(project: Project) -> serde_json::Value {
    serde_json::json!({
        "id": project.id,
        "company_id": project.company_id,
        "department_id": project.department_id,
        "name": project.name,
        "description": project.description,
        "start_date": project.start_date,
        "end_date": project.end_date,
        "assigned_employees": project.assigned_employees,
        "slug": project.slug,
    })
}

pub fn review_to_json(review: PerformanceReview) -> serde_json::Value {
    serde_json::json!({
        "id": review.id,
        "employee_id": review.employee_id,
        "reviewer_id": review.reviewer_id,
        "manager_id": review.manager_id,
        "stage": review.stage,
        "feedback": review.feedback,
        "scheduled_date": review.scheduled_date,
        "created_at": review.created_at,
        "updated_at": review.updated_at,
    })
}
