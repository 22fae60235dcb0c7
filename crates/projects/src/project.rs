//! Project: scoped work with a date range and assigned staff.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tenure_core::{
    CompanyId, DepartmentId, DomainError, DomainResult, EmployeeId, Entity, ProjectId, Slugged,
};

/// A project.
///
/// # Invariants
/// - Belongs to exactly one company.
/// - `end_date` never precedes `start_date`.
/// - Assigned employees belong to the same company (enforced at the storage
///   boundary, which can see both records).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub company_id: CompanyId,
    pub department_id: Option<DepartmentId>,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub assigned_employees: Vec<EmployeeId>,
    pub slug: String,
}

impl Project {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProjectId,
        company_id: CompanyId,
        department_id: Option<DepartmentId>,
        name: &str,
        description: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        slug: String,
    ) -> DomainResult<Self> {
        valid_range(start_date, end_date)?;
        Ok(Self {
            id,
            company_id,
            department_id,
            name: valid_name(name)?,
            description: description.trim().to_string(),
            start_date,
            end_date,
            assigned_employees: Vec::new(),
            slug,
        })
    }

    /// Whether the project is running on `today`, inclusive on both ends.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.start_date <= today && today <= self.end_date
    }
}

impl Entity for Project {
    type Id = ProjectId;

    fn id(&self) -> ProjectId {
        self.id
    }
}

impl Slugged for Project {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Partial update; absent fields stay untouched.
///
/// Date edits are validated against the resulting range, so one end can
/// move on its own as long as the order still holds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assigned_employees: Option<Vec<EmployeeId>>,
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project) -> DomainResult<()> {
        let start = self.start_date.unwrap_or(project.start_date);
        let end = self.end_date.unwrap_or(project.end_date);
        valid_range(start, end)?;

        if let Some(name) = self.name {
            project.name = valid_name(&name)?;
        }
        if let Some(description) = self.description {
            project.description = description.trim().to_string();
        }
        if let Some(department_id) = self.department_id {
            project.department_id = Some(department_id);
        }
        if let Some(assigned) = self.assigned_employees {
            project.assigned_employees = assigned;
        }
        project.start_date = start;
        project.end_date = end;
        Ok(())
    }
}

fn valid_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("project name cannot be empty"));
    }
    Ok(name.to_string())
}

fn valid_range(start: NaiveDate, end: NaiveDate) -> DomainResult<()> {
    if end < start {
        return Err(DomainError::invariant("end_date precedes start_date"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Project {
        Project::new(
            ProjectId::new(),
            CompanyId::new(),
            None,
            "Warehouse Migration",
            "Move stock tracking off spreadsheets.",
            date(2025, 3, 1),
            date(2025, 9, 30),
            "44556677".into(),
        )
        .unwrap()
    }

    #[test]
    fn inverted_range_is_rejected_at_creation() {
        let err = Project::new(
            ProjectId::new(),
            CompanyId::new(),
            None,
            "Doomed",
            "",
            date(2025, 9, 30),
            date(2025, 3, 1),
            "44556677".into(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn single_day_project_is_valid() {
        let project = Project::new(
            ProjectId::new(),
            CompanyId::new(),
            None,
            "Inventory Day",
            "",
            date(2025, 3, 1),
            date(2025, 3, 1),
            "44556677".into(),
        )
        .unwrap();
        assert!(project.is_active_on(date(2025, 3, 1)));
        assert!(!project.is_active_on(date(2025, 3, 2)));
    }

    #[test]
    fn patch_can_move_one_end_of_the_range() {
        let mut project = sample();
        ProjectPatch {
            end_date: Some(date(2025, 12, 31)),
            ..Default::default()
        }
        .apply(&mut project)
        .unwrap();
        assert_eq!(project.end_date, date(2025, 12, 31));
        assert_eq!(project.start_date, date(2025, 3, 1));
    }

    #[test]
    fn patch_rejects_a_crossing_range() {
        let mut project = sample();
        let err = ProjectPatch {
            start_date: Some(date(2025, 10, 1)),
            ..Default::default()
        }
        .apply(&mut project)
        .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        // Failed patches leave the record untouched.
        assert_eq!(project.start_date, date(2025, 3, 1));
        assert_eq!(project.end_date, date(2025, 9, 30));
    }

    #[test]
    fn assignment_patch_replaces_the_roster() {
        let mut project = sample();
        let crew = vec![EmployeeId::new(), EmployeeId::new()];
        ProjectPatch {
            assigned_employees: Some(crew.clone()),
            ..Default::default()
        }
        .apply(&mut project)
        .unwrap();
        assert_eq!(project.assigned_employees, crew);

        ProjectPatch {
            assigned_employees: Some(Vec::new()),
            ..Default::default()
        }
        .apply(&mut project)
        .unwrap();
        assert!(project.assigned_employees.is_empty());
    }
}
