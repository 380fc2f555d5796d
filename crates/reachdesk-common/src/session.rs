//! Explicit session context handed to every view and client.
//!
//! Auth, currency and team are never looked up ambiently; whoever builds a
//! view passes the session in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::UserId;
use crate::money::Currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superadmin,
    Admin,
    Hr,
    Brand,
    Creator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}

#[derive(Clone)]
pub struct SessionContext {
    pub user: Option<AuthUser>,
    pub currency: Currency,
    pub team: Option<Uuid>,
    /// Bearer token for the backend; absent for anonymous sessions.
    token: Option<String>,
}

impl SessionContext {
    pub fn new(currency: Currency) -> Self {
        Self { user: None, currency, team: None, token: None }
    }

    pub fn with_user(mut self, user: AuthUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_team(mut self, team: Uuid) -> Self {
        self.team = Some(team);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_superadmin(&self) -> bool {
        matches!(self.user.as_ref().map(|u| u.role), Some(Role::Superadmin))
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("user", &self.user)
            .field("currency", &self.currency)
            .field("team", &self.team)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        SessionContext::new(Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let session = SessionContext::default().with_token("sk-live-123");
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("sk-live-123"));
        assert!(rendered.contains("<redacted>"));
        assert_eq!(session.token(), Some("sk-live-123"));
    }

    #[test]
    fn test_superadmin_role() {
        let session = SessionContext::default().with_user(AuthUser {
            id: Uuid::new_v4(),
            email: "root@reachdesk.io".into(),
            role: Role::Superadmin,
        });
        assert!(session.is_superadmin());
        assert!(!SessionContext::default().is_superadmin());
    }
}
