//! reachdesk-common — Shared types, errors, and helpers used across all Reachdesk crates.

pub mod error;
pub mod entities;
pub mod envelope;
pub mod money;
pub mod notify;
pub mod reduce;
pub mod scope;
pub mod session;

// Re-export commonly used types
pub use entities::{
    Brand, BrandId, Deliverable, DeliverableKind, Employee, EmployeeId, GenderSplit, Influencer,
    InfluencerId, Proposal, ProposalId, ProposalStatus, StatusChange, UserAccount, UserId,
    UserStatus,
};
pub use envelope::{ApiEnvelope, GENERIC_FAILURE};
pub use error::{ReachdeskError, Result};
pub use money::{Cents, Currency};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use scope::{BusyFlag, ViewScope};
pub use session::SessionContext;
