//! Typed API-client interfaces.
//!
//! Views only ever talk to these traits. The HTTP implementation lives in
//! [`crate::http`]; tests substitute in-memory fakes.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use reachdesk_common::{
    Brand, BrandId, Cents, Deliverable, Employee, Influencer, InfluencerId, Proposal, ProposalId,
    ProposalStatus, Result, StatusChange, UserAccount, UserId, UserStatus,
};

// ── Queries ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfluencerQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_followers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

// ── Payloads ─────────────────────────────────────────────────────────────────

/// Deliverables contracted with one influencer inside a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluencerLinePayload {
    pub influencer_id: InfluencerId,
    pub deliverables: Vec<Deliverable>,
}

/// Body for creating a brand proposal or saving it as a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalPayload {
    pub brand_id: BrandId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
    pub status: ProposalStatus,
    pub total_budget: Cents,
    pub influencers: Vec<InfluencerLinePayload>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueField {
    EmployeeCode,
    Email,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::EmployeeCode => "employee_code",
            UniqueField::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub employee_code: String,
    pub email: String,
    pub full_name: String,
    pub department: String,
}

// ── Traits ───────────────────────────────────────────────────────────────────

#[async_trait]
pub trait InfluencerApi: Send + Sync {
    async fn get_influencers(&self, query: &InfluencerQuery) -> Result<Vec<Influencer>>;
    async fn get_proposal(&self, id: ProposalId) -> Result<Proposal>;
    async fn get_proposal_influencers(&self, id: ProposalId) -> Result<Vec<Influencer>>;
}

#[async_trait]
pub trait ProposalsApi: Send + Sync {
    async fn list_brands(&self) -> Result<Vec<Brand>>;
    async fn create_brand_proposal(&self, payload: &ProposalPayload) -> Result<Proposal>;
    async fn save_proposal_draft(&self, payload: &ProposalPayload) -> Result<Proposal>;
    async fn approve_campaign(&self, id: ProposalId) -> Result<Proposal>;
}

#[async_trait]
pub trait SuperadminApi: Send + Sync {
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<UserAccount>>;
    async fn update_user_status(&self, id: UserId, change: &StatusChange) -> Result<UserAccount>;
}

#[async_trait]
pub trait HrmApi: Send + Sync {
    async fn check_unique(&self, field: UniqueField, value: &str) -> Result<Availability>;
    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee>;
}
