//! Infrastructure layer: persistence traits, the in-memory store, slugs.

pub mod slug;
pub mod store;

pub use slug::{DEFAULT_SLUG_ATTEMPTS, SLUG_LEN, SlugSpaceExhausted, generate_slug};
pub use store::{
    CompanyStore, DepartmentStore, EmployeeStore, InMemoryHrStore, NewCompany, NewDepartment,
    NewEmployee, NewProject, NewReview, ProjectStore, ReviewStore, StoreError, StoreResult,
};
