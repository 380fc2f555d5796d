//! Fixture builders for domain entities.

use reachdesk_common::{Brand, Cents, GenderSplit, Influencer, UserAccount, UserStatus};
use uuid::Uuid;

pub struct InfluencerBuilder {
    inner: Influencer,
}

/// Start an influencer with a fresh id, the given handle and follower count.
pub fn influencer(username: &str, followers: u64) -> InfluencerBuilder {
    InfluencerBuilder {
        inner: Influencer {
            id: Uuid::new_v4(),
            username: username.to_string(),
            followers_count: followers,
            engagement_rate: 0.0,
            gender_split: None,
            estimated_reach: None,
            cost_per_post: None,
            location: None,
            platform: Some("instagram".to_string()),
        },
    }
}

impl InfluencerBuilder {
    pub fn id(mut self, id: Uuid) -> Self {
        self.inner.id = id;
        self
    }

    pub fn engagement(mut self, rate: f64) -> Self {
        self.inner.engagement_rate = rate;
        self
    }

    pub fn gender(mut self, male: f64, female: f64) -> Self {
        self.inner.gender_split = Some(GenderSplit { male, female });
        self
    }

    pub fn reach(mut self, reach: u64) -> Self {
        self.inner.estimated_reach = Some(reach);
        self
    }

    pub fn cost(mut self, cents: i64) -> Self {
        self.inner.cost_per_post = Some(Cents(cents));
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.inner.location = Some(location.to_string());
        self
    }

    pub fn build(self) -> Influencer {
        self.inner
    }
}

pub fn brand(name: &str) -> Brand {
    Brand { id: Uuid::new_v4(), name: name.to_string() }
}

/// A user account fixture with the given status.
pub fn user(email: &str, status: UserStatus) -> UserAccount {
    UserAccount {
        id: Uuid::new_v4(),
        email: email.to_string(),
        display_name: None,
        role: Some("creator".to_string()),
        status,
    }
}
