//! Employee creation form.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use reachdesk_client::{HrmApi, NewEmployee, UniqueField};
use reachdesk_common::{
    BusyFlag, Employee, Notification, Notifier, ReachdeskError, Result, ViewScope,
};

use crate::uniqueness::{check_format, FieldState, UniquenessValidator};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter the employee's full name")]
    MissingName,
    #[error("Please enter an employee code")]
    MissingCode,
    #[error("Please enter an email address")]
    MissingEmail,
    #[error("Please select a department")]
    MissingDepartment,
    #[error("{0}")]
    Format(String),
    #[error("Please wait for the {0} check to finish")]
    CheckPending(&'static str),
    #[error("This {0} is already in use")]
    Taken(&'static str),
    #[error("Please confirm the {0} is available")]
    Unchecked(&'static str),
}

impl From<FormError> for ReachdeskError {
    fn from(e: FormError) -> Self {
        ReachdeskError::Validation(e.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeForm {
    pub full_name: String,
    pub employee_code: String,
    pub email: String,
    pub department: String,
}

impl EmployeeForm {
    /// Required fields and local formats, first failure wins.
    pub fn validate(&self) -> std::result::Result<(), FormError> {
        if self.full_name.trim().is_empty() {
            return Err(FormError::MissingName);
        }
        if self.employee_code.trim().is_empty() {
            return Err(FormError::MissingCode);
        }
        if self.email.trim().is_empty() {
            return Err(FormError::MissingEmail);
        }
        if self.department.trim().is_empty() {
            return Err(FormError::MissingDepartment);
        }
        check_format(UniqueField::EmployeeCode, self.employee_code.trim()).map_err(FormError::Format)?;
        check_format(UniqueField::Email, self.email.trim()).map_err(FormError::Format)?;
        Ok(())
    }

    pub fn to_new_employee(&self) -> NewEmployee {
        NewEmployee {
            employee_code: self.employee_code.trim().to_string(),
            email: self.email.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            department: self.department.trim().to_string(),
        }
    }
}

/// Backs the "new employee" page: live uniqueness checks and the create call.
pub struct EmployeeOnboarding {
    api: Arc<dyn HrmApi>,
    validator: Arc<UniquenessValidator>,
    busy: BusyFlag,
    scope: ViewScope,
}

impl EmployeeOnboarding {
    pub fn new(api: Arc<dyn HrmApi>, debounce: Duration) -> Self {
        let scope = ViewScope::new();
        let validator = UniquenessValidator::new(api.clone(), debounce).with_scope(scope.child());
        Self { api, validator: Arc::new(validator), busy: BusyFlag::new(), scope }
    }

    pub fn validator(&self) -> &Arc<UniquenessValidator> {
        &self.validator
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    fn ensure_available(&self, field: UniqueField, value: &str) -> std::result::Result<(), FormError> {
        let label = match field {
            UniqueField::EmployeeCode => "employee code",
            UniqueField::Email => "email",
        };
        match self.validator.state_for(field, value) {
            FieldState::Available => Ok(()),
            FieldState::Pending => Err(FormError::CheckPending(label)),
            FieldState::Taken => Err(FormError::Taken(label)),
            FieldState::Invalid(msg) | FieldState::Failed(msg) => Err(FormError::Format(msg)),
            FieldState::Idle => Err(FormError::Unchecked(label)),
        }
    }

    /// Create the employee once the form is complete and both checks passed.
    #[instrument(skip(self, form, notifier), fields(code = %form.employee_code))]
    pub async fn create(&self, form: &EmployeeForm, notifier: &dyn Notifier) -> Result<Employee> {
        let result = self.try_create(form).await;
        match &result {
            Ok(employee) => {
                info!(employee_id = %employee.id, "Employee created");
                notifier.notify(Notification::success(format!(
                    "Employee {} created",
                    employee.full_name
                )));
                self.validator.reset();
            }
            Err(e) => notifier.notify_error(e),
        }
        result
    }

    async fn try_create(&self, form: &EmployeeForm) -> Result<Employee> {
        form.validate()?;
        self.ensure_available(UniqueField::EmployeeCode, &form.employee_code)?;
        self.ensure_available(UniqueField::Email, &form.email)?;
        if self.busy.is_busy() {
            return Err(ReachdeskError::Validation("A save is already in progress".to_string()));
        }

        let payload = form.to_new_employee();
        let _busy = self.busy.raise();
        self.scope.run(self.api.create_employee(&payload)).await
    }
}

impl Drop for EmployeeOnboarding {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
