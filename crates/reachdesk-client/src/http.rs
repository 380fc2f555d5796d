//! `reqwest`-backed implementation of every API trait.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use reachdesk_common::{
    ApiEnvelope, Brand, Employee, Influencer, Proposal, ProposalId, ReachdeskError, Result,
    SessionContext, StatusChange, UserAccount, UserId,
};
use reachdesk_config::ApiConfig;

use crate::api::{
    Availability, HrmApi, InfluencerApi, InfluencerQuery, NewEmployee, ProposalPayload,
    ProposalsApi, SuperadminApi, UniqueField, UserQuery,
};

/// Maximum number of body bytes echoed into a status error.
const ERROR_BODY_PREVIEW: usize = 200;

#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    session: SessionContext,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig, session: SessionContext) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReachdeskError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, self.url(path));
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn call<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<ApiEnvelope<T>> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        match serde_json::from_slice::<ApiEnvelope<T>>(&body) {
            Ok(envelope) => {
                debug!(status = status.as_u16(), success = envelope.success, "API response");
                Ok(envelope)
            }
            // Error pages from proxies rarely carry the envelope.
            Err(_) if !status.is_success() => {
                let text = String::from_utf8_lossy(&body);
                let message: String = text.chars().take(ERROR_BODY_PREVIEW).collect();
                Err(ReachdeskError::Status { status: status.as_u16(), message })
            }
            Err(e) => Err(ReachdeskError::Serialization(e)),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(self.request(Method::GET, path)).await?.into_data()
    }

    async fn get_with<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.call(self.request(Method::GET, path).query(query)).await?.into_data()
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call(self.request(method, path).json(body)).await?.into_data()
    }
}

#[async_trait]
impl InfluencerApi for HttpApiClient {
    #[instrument(skip(self))]
    async fn get_influencers(&self, query: &InfluencerQuery) -> Result<Vec<Influencer>> {
        let influencers: Vec<Influencer> = self.get_with("influencers", query).await?;
        debug!(count = influencers.len(), "Fetched influencers");
        Ok(influencers)
    }

    #[instrument(skip(self))]
    async fn get_proposal(&self, id: ProposalId) -> Result<Proposal> {
        self.get(&format!("proposals/{}", id)).await
    }

    #[instrument(skip(self))]
    async fn get_proposal_influencers(&self, id: ProposalId) -> Result<Vec<Influencer>> {
        self.get(&format!("proposals/{}/influencers", id)).await
    }
}

#[async_trait]
impl ProposalsApi for HttpApiClient {
    #[instrument(skip(self))]
    async fn list_brands(&self) -> Result<Vec<Brand>> {
        self.get("brands").await
    }

    #[instrument(skip(self, payload), fields(title = %payload.title))]
    async fn create_brand_proposal(&self, payload: &ProposalPayload) -> Result<Proposal> {
        self.send_json(Method::POST, "brand-proposals", payload).await
    }

    #[instrument(skip(self, payload), fields(title = %payload.title))]
    async fn save_proposal_draft(&self, payload: &ProposalPayload) -> Result<Proposal> {
        self.send_json(Method::POST, "brand-proposals/drafts", payload).await
    }

    #[instrument(skip(self))]
    async fn approve_campaign(&self, id: ProposalId) -> Result<Proposal> {
        self.send_json(Method::POST, &format!("proposals/{}/approve", id), &serde_json::json!({}))
            .await
    }
}

#[async_trait]
impl SuperadminApi for HttpApiClient {
    #[instrument(skip(self))]
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<UserAccount>> {
        self.get_with("superadmin/users", query).await
    }

    #[instrument(skip(self, change), fields(status = change.status.as_str()))]
    async fn update_user_status(&self, id: UserId, change: &StatusChange) -> Result<UserAccount> {
        self.send_json(Method::PATCH, &format!("superadmin/users/{}/status", id), change).await
    }
}

#[async_trait]
impl HrmApi for HttpApiClient {
    #[instrument(skip(self, value), fields(field = field.as_str()))]
    async fn check_unique(&self, field: UniqueField, value: &str) -> Result<Availability> {
        let query = [("field", field.as_str()), ("value", value)];
        self.get_with("hrm/employees/check", &query).await
    }

    #[instrument(skip(self, employee), fields(code = %employee.employee_code))]
    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee> {
        self.send_json(Method::POST, "hrm/employees", employee).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ApiConfig { base_url: "http://localhost:9000/api/".into(), ..Default::default() };
        let client = HttpApiClient::new(&config, SessionContext::default()).unwrap();
        assert_eq!(client.url("/brands"), "http://localhost:9000/api/brands");
        assert_eq!(client.url("proposals/1"), "http://localhost:9000/api/proposals/1");
    }
}
