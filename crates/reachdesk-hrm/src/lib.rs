//! reachdesk-hrm — Employee onboarding: debounced uniqueness checks and the
//! creation form.

pub mod employee;
pub mod uniqueness;

pub use employee::{EmployeeForm, EmployeeOnboarding, FormError};
pub use uniqueness::{check_format, FieldState, UniquenessValidator};
