/// Core entity types as returned by the Reachdesk backend.
/// The client consumes these; it never owns the records of truth.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ReachdeskError, Result};
use crate::money::Cents;

pub type InfluencerId = Uuid;
pub type ProposalId = Uuid;
pub type BrandId = Uuid;
pub type UserId = Uuid;
pub type EmployeeId = Uuid;

// ---------------------------------------------------------------------------
// Influencer
// ---------------------------------------------------------------------------

/// Audience gender split in percent. The two values sum to roughly 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderSplit {
    pub male: f64,
    pub female: f64,
}

impl GenderSplit {
    pub const EVEN: GenderSplit = GenderSplit { male: 50.0, female: 50.0 };
}

impl Default for GenderSplit {
    fn default() -> Self {
        GenderSplit::EVEN
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Influencer {
    pub id: InfluencerId,
    pub username: String,
    #[serde(default)]
    pub followers_count: u64,
    /// Percentage, e.g. 3.2 for 3.2%
    #[serde(default)]
    pub engagement_rate: f64,
    #[serde(default)]
    pub gender_split: Option<GenderSplit>,
    #[serde(default)]
    pub estimated_reach: Option<u64>,
    #[serde(default)]
    pub cost_per_post: Option<Cents>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

// ---------------------------------------------------------------------------
// Proposal / Brand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub status: ProposalStatus,
    pub budget_total: Cents,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand_id: Option<BrandId>,
    #[serde(default)]
    pub starts_on: Option<NaiveDate>,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Deliverables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverableKind {
    FeedPost,
    Story,
    Reel,
    Video,
    BlogPost,
    Other,
}

impl DeliverableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliverableKind::FeedPost => "feed_post",
            DeliverableKind::Story => "story",
            DeliverableKind::Reel => "reel",
            DeliverableKind::Video => "video",
            DeliverableKind::BlogPost => "blog_post",
            DeliverableKind::Other => "other",
        }
    }
}

/// A unit of contracted content, e.g. "2 feed posts".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deliverable {
    pub kind: DeliverableKind,
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: Option<Cents>,
}

// ---------------------------------------------------------------------------
// User accounts (superadmin)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Pending,
    Suspended,
    Banned,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Pending => "pending",
            UserStatus::Suspended => "suspended",
            UserStatus::Banned => "banned",
        }
    }

    /// Restrictive statuses must carry a reason.
    pub fn requires_reason(&self) -> bool {
        matches!(self, UserStatus::Suspended | UserStatus::Banned)
    }
}

impl std::str::FromStr for UserStatus {
    type Err = ReachdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "pending" => Ok(UserStatus::Pending),
            "suspended" => Ok(UserStatus::Suspended),
            "banned" => Ok(UserStatus::Banned),
            other => Err(ReachdeskError::Validation(format!("Unknown user status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub status: UserStatus,
}

/// A validated status transition request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StatusChange {
    pub fn new(status: UserStatus, reason: Option<String>) -> Result<Self> {
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        if status.requires_reason() && reason.is_none() {
            return Err(ReachdeskError::Validation(format!(
                "A reason is required to mark a user as {}",
                status.as_str()
            )));
        }
        Ok(Self { status, reason })
    }
}

// ---------------------------------------------------------------------------
// Employees (HRM)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub employee_code: String,
    pub email: String,
    pub full_name: String,
    pub department: String,
}
