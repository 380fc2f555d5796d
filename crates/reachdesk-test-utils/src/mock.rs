//! In-memory backend implementing every API trait.
//!
//! Failures are scripted per call name; every call is recorded so tests can
//! assert on what reached the "network".

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use reachdesk_client::{
    Availability, HrmApi, InfluencerApi, InfluencerQuery, NewEmployee, ProposalPayload,
    ProposalsApi, SuperadminApi, UniqueField, UserQuery,
};
use reachdesk_common::{
    Brand, Employee, Influencer, Proposal, ProposalId, ReachdeskError, Result, StatusChange,
    UserAccount, UserId,
};

#[derive(Default)]
struct State {
    influencers: Vec<Influencer>,
    proposals: HashMap<ProposalId, (Proposal, Vec<Influencer>)>,
    brands: Vec<Brand>,
    users: Vec<UserAccount>,
    taken: HashSet<(UniqueField, String)>,
    delays: HashMap<String, Duration>,
    failures: HashMap<&'static str, String>,
    calls: Vec<String>,
    payloads: Vec<ProposalPayload>,
}

#[derive(Default)]
pub struct MockBackend {
    state: Mutex<State>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    pub fn with_influencers(self, influencers: Vec<Influencer>) -> Self {
        self.with_state(|s| s.influencers = influencers);
        self
    }

    pub fn with_proposal(self, proposal: Proposal, influencers: Vec<Influencer>) -> Self {
        self.with_state(|s| {
            s.proposals.insert(proposal.id, (proposal, influencers));
        });
        self
    }

    pub fn with_brands(self, brands: Vec<Brand>) -> Self {
        self.with_state(|s| s.brands = brands);
        self
    }

    pub fn with_user(self, user: UserAccount) -> Self {
        self.with_state(|s| s.users.push(user));
        self
    }

    pub fn with_taken(self, field: UniqueField, value: &str) -> Self {
        self.with_state(|s| {
            s.taken.insert((field, value.to_string()));
        });
        self
    }

    /// Delay uniqueness checks for `value` to simulate a slow response.
    pub fn with_delay(self, value: &str, delay: Duration) -> Self {
        self.with_state(|s| {
            s.delays.insert(value.to_string(), delay);
        });
        self
    }

    /// Make every call named `call` fail with the given server message.
    pub fn fail(&self, call: &'static str, message: &str) {
        self.with_state(|s| {
            s.failures.insert(call, message.to_string());
        });
    }

    pub fn clear_failures(&self) {
        self.with_state(|s| s.failures.clear());
    }

    /// Names of calls that reached the backend, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.with_state(|s| s.calls.clone())
    }

    pub fn call_count(&self, call: &str) -> usize {
        self.with_state(|s| s.calls.iter().filter(|c| c.as_str() == call).count())
    }

    pub fn payloads(&self) -> Vec<ProposalPayload> {
        self.with_state(|s| s.payloads.clone())
    }

    fn enter(&self, call: &'static str) -> Result<()> {
        self.with_state(|s| {
            s.calls.push(call.to_string());
            match s.failures.get(call) {
                Some(msg) => Err(ReachdeskError::Api(msg.clone())),
                None => Ok(()),
            }
        })
    }

    fn store_proposal(&self, payload: &ProposalPayload) -> Proposal {
        let proposal = Proposal {
            id: Uuid::new_v4(),
            title: payload.title.clone(),
            status: payload.status,
            budget_total: payload.total_budget,
            description: payload.description.clone(),
            brand_id: Some(payload.brand_id),
            starts_on: payload.starts_on,
            ends_on: payload.ends_on,
            created_at: Some(Utc::now()),
        };
        self.with_state(|s| {
            s.payloads.push(payload.clone());
            s.proposals.insert(proposal.id, (proposal.clone(), Vec::new()));
        });
        proposal
    }
}

#[async_trait]
impl InfluencerApi for MockBackend {
    async fn get_influencers(&self, query: &InfluencerQuery) -> Result<Vec<Influencer>> {
        self.enter("get_influencers")?;
        let min = query.min_followers.unwrap_or(0);
        let search = query.search.clone().unwrap_or_default().to_lowercase();
        Ok(self.with_state(|s| {
            s.influencers
                .iter()
                .filter(|i| i.followers_count >= min)
                .filter(|i| search.is_empty() || i.username.to_lowercase().contains(&search))
                .cloned()
                .collect()
        }))
    }

    async fn get_proposal(&self, id: ProposalId) -> Result<Proposal> {
        self.enter("get_proposal")?;
        self.with_state(|s| s.proposals.get(&id).map(|(p, _)| p.clone()))
            .ok_or_else(|| ReachdeskError::Api("Proposal not found".to_string()))
    }

    async fn get_proposal_influencers(&self, id: ProposalId) -> Result<Vec<Influencer>> {
        self.enter("get_proposal_influencers")?;
        self.with_state(|s| s.proposals.get(&id).map(|(_, infs)| infs.clone()))
            .ok_or_else(|| ReachdeskError::Api("Proposal not found".to_string()))
    }
}

#[async_trait]
impl ProposalsApi for MockBackend {
    async fn list_brands(&self) -> Result<Vec<Brand>> {
        self.enter("list_brands")?;
        Ok(self.with_state(|s| s.brands.clone()))
    }

    async fn create_brand_proposal(&self, payload: &ProposalPayload) -> Result<Proposal> {
        self.enter("create_brand_proposal")?;
        Ok(self.store_proposal(payload))
    }

    async fn save_proposal_draft(&self, payload: &ProposalPayload) -> Result<Proposal> {
        self.enter("save_proposal_draft")?;
        Ok(self.store_proposal(payload))
    }

    async fn approve_campaign(&self, id: ProposalId) -> Result<Proposal> {
        self.enter("approve_campaign")?;
        self.with_state(|s| {
            s.proposals.get_mut(&id).map(|(p, _)| {
                p.status = reachdesk_common::ProposalStatus::Approved;
                p.clone()
            })
        })
        .ok_or_else(|| ReachdeskError::Api("Proposal not found".to_string()))
    }
}

#[async_trait]
impl SuperadminApi for MockBackend {
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<UserAccount>> {
        self.enter("list_users")?;
        Ok(self.with_state(|s| {
            s.users
                .iter()
                .filter(|u| query.status.map_or(true, |st| u.status == st))
                .cloned()
                .collect()
        }))
    }

    async fn update_user_status(&self, id: UserId, change: &StatusChange) -> Result<UserAccount> {
        self.enter("update_user_status")?;
        self.with_state(|s| {
            s.users.iter_mut().find(|u| u.id == id).map(|u| {
                u.status = change.status;
                u.clone()
            })
        })
        .ok_or_else(|| ReachdeskError::Api("User not found".to_string()))
    }
}

#[async_trait]
impl HrmApi for MockBackend {
    async fn check_unique(&self, field: UniqueField, value: &str) -> Result<Availability> {
        self.enter("check_unique")?;
        let delay = self.with_state(|s| s.delays.get(value).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let taken = self.with_state(|s| s.taken.contains(&(field, value.to_string())));
        Ok(Availability { available: !taken })
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee> {
        self.enter("create_employee")?;
        self.with_state(|s| {
            s.taken.insert((UniqueField::EmployeeCode, employee.employee_code.clone()));
            s.taken.insert((UniqueField::Email, employee.email.clone()));
        });
        Ok(Employee {
            id: Uuid::new_v4(),
            employee_code: employee.employee_code.clone(),
            email: employee.email.clone(),
            full_name: employee.full_name.clone(),
            department: employee.department.clone(),
        })
    }
}
