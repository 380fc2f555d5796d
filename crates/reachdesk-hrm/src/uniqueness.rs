//! Debounced uniqueness checks for employee code and e-mail.
//!
//! Every keystroke takes a ticket from the field's sequence. A check only
//! writes its result while its ticket is still the latest one for that field,
//! so a slow answer for old input can never overwrite a newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use reachdesk_client::{HrmApi, UniqueField};
use reachdesk_common::{ReachdeskError, Result, ViewScope};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum FieldState {
    Idle,
    Pending,
    Available,
    Taken,
    Invalid(String),
    Failed(String),
}

impl FieldState {
    pub fn is_available(&self) -> bool {
        matches!(self, FieldState::Available)
    }

    /// Message shown under the input, if any.
    pub fn message(&self, field: UniqueField) -> Option<String> {
        let label = field_label(field);
        match self {
            FieldState::Idle | FieldState::Pending | FieldState::Available => None,
            FieldState::Taken => Some(format!("This {label} is already in use")),
            FieldState::Invalid(msg) | FieldState::Failed(msg) => Some(msg.clone()),
        }
    }
}

fn field_label(field: UniqueField) -> &'static str {
    match field {
        UniqueField::EmployeeCode => "employee code",
        UniqueField::Email => "email",
    }
}

#[derive(Debug)]
struct FieldSlot {
    seq: AtomicU64,
    /// Latest written state and the input it belongs to.
    state: Mutex<(FieldState, String)>,
}

impl Default for FieldSlot {
    fn default() -> Self {
        Self { seq: AtomicU64::new(0), state: Mutex::new((FieldState::Idle, String::new())) }
    }
}

impl FieldSlot {
    fn next_ticket(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == ticket
    }

    /// Write `state` unless a newer ticket exists. Returns whether it was written.
    fn apply(&self, ticket: u64, value: &str, state: FieldState) -> bool {
        let mut current = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if !self.is_latest(ticket) {
            return false;
        }
        *current = (state, value.to_string());
        true
    }

    fn get(&self) -> (FieldState, String) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Owns both fields' check state for one employee form.
///
/// Shared behind an `Arc` so each keystroke can be checked on its own task.
pub struct UniquenessValidator {
    api: Arc<dyn HrmApi>,
    debounce: Duration,
    scope: ViewScope,
    employee_code: FieldSlot,
    email: FieldSlot,
}

impl UniquenessValidator {
    pub fn new(api: Arc<dyn HrmApi>, debounce: Duration) -> Self {
        Self {
            api,
            debounce,
            scope: ViewScope::new(),
            employee_code: FieldSlot::default(),
            email: FieldSlot::default(),
        }
    }

    /// Use `scope` so the checks end with the owning view.
    pub fn with_scope(mut self, scope: ViewScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    fn slot(&self, field: UniqueField) -> &FieldSlot {
        match field {
            UniqueField::EmployeeCode => &self.employee_code,
            UniqueField::Email => &self.email,
        }
    }

    pub fn state(&self, field: UniqueField) -> FieldState {
        self.slot(field).get().0
    }

    /// State of `field` as it applies to `value`; idle when the last check was
    /// for different input.
    pub fn state_for(&self, field: UniqueField, value: &str) -> FieldState {
        let (state, checked) = self.slot(field).get();
        if checked == value.trim() {
            state
        } else {
            FieldState::Idle
        }
    }

    /// Handle new input for `field`.
    ///
    /// Returns the state written by this check, `Ok(None)` when newer input
    /// superseded it, and `Err(Cancelled)` once the scope has ended.
    #[instrument(skip(self))]
    pub async fn validate(&self, field: UniqueField, value: &str) -> Result<Option<FieldState>> {
        let slot = self.slot(field);
        let ticket = slot.next_ticket();
        let value = value.trim();

        if value.is_empty() {
            return Ok(written(slot, ticket, value, FieldState::Idle));
        }
        if let Err(msg) = check_format(field, value) {
            return Ok(written(slot, ticket, value, FieldState::Invalid(msg)));
        }
        if !slot.apply(ticket, value, FieldState::Pending) {
            return Ok(None);
        }

        let debounce = self.debounce;
        self.scope
            .run(async move {
                tokio::time::sleep(debounce).await;
                Ok(())
            })
            .await?;
        if !slot.is_latest(ticket) {
            debug!(ticket, "Check superseded during debounce");
            return Ok(None);
        }

        let outcome = self.scope.run(self.api.check_unique(field, value)).await;
        let state = match outcome {
            Err(ReachdeskError::Cancelled) => return Err(ReachdeskError::Cancelled),
            Ok(availability) if availability.available => FieldState::Available,
            Ok(_) => FieldState::Taken,
            Err(e) => {
                warn!(error = %e, "Uniqueness check failed");
                FieldState::Failed(e.user_message())
            }
        };

        if slot.apply(ticket, value, state.clone()) {
            Ok(Some(state))
        } else {
            debug!(ticket, "Discarding stale uniqueness response");
            Ok(None)
        }
    }

    /// Drop both fields back to idle, superseding anything in flight.
    pub fn reset(&self) {
        for slot in [&self.employee_code, &self.email] {
            let ticket = slot.next_ticket();
            slot.apply(ticket, "", FieldState::Idle);
        }
    }
}

impl Drop for UniquenessValidator {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

fn written(slot: &FieldSlot, ticket: u64, value: &str, state: FieldState) -> Option<FieldState> {
    slot.apply(ticket, value, state.clone()).then_some(state)
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Local format check run before any network call.
pub fn check_format(field: UniqueField, value: &str) -> std::result::Result<(), String> {
    match field {
        UniqueField::Email => {
            if email_regex().is_match(value) {
                Ok(())
            } else {
                Err("Please enter a valid email address".to_string())
            }
        }
        UniqueField::EmployeeCode => {
            let len_ok = (2..=20).contains(&value.len());
            let chars_ok = value.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-');
            if len_ok && chars_ok {
                Ok(())
            } else {
                Err("Employee code must be 2-20 characters of A-Z, 0-9 or '-'".to_string())
            }
        }
    }
}
