//! Per-influencer deliverable lines and the derived proposal budget.

use serde::{Deserialize, Serialize};

use reachdesk_common::reduce::sum_by;
use reachdesk_common::{Cents, Deliverable, DeliverableKind, InfluencerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverableLine {
    pub kind: DeliverableKind,
    pub quantity: u32,
    pub unit_price: Cents,
}

impl DeliverableLine {
    pub fn new(kind: DeliverableKind, quantity: u32, unit_price: Cents) -> Self {
        Self { kind, quantity, unit_price }
    }

    pub fn subtotal(&self) -> Cents {
        self.unit_price * self.quantity
    }
}

impl From<&DeliverableLine> for Deliverable {
    fn from(line: &DeliverableLine) -> Self {
        Deliverable { kind: line.kind, quantity: line.quantity, unit_price: Some(line.unit_price) }
    }
}

/// One influencer inside a proposal, with what they are contracted to deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfluencerProposal {
    pub influencer_id: InfluencerId,
    pub username: String,
    pub deliverables: Vec<DeliverableLine>,
}

impl InfluencerProposal {
    pub fn new(influencer_id: InfluencerId, username: impl Into<String>) -> Self {
        Self { influencer_id, username: username.into(), deliverables: Vec::new() }
    }

    pub fn subtotal(&self) -> Cents {
        sum_by(&self.deliverables, DeliverableLine::subtotal)
    }
}

/// Σ unit_price × quantity over every line of every influencer.
pub fn total_budget(items: &[InfluencerProposal]) -> Cents {
    sum_by(items, InfluencerProposal::subtotal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_total_budget() {
        let mut ana = InfluencerProposal::new(Uuid::new_v4(), "ana");
        ana.deliverables.push(DeliverableLine::new(DeliverableKind::FeedPost, 2, Cents(50_000)));
        ana.deliverables.push(DeliverableLine::new(DeliverableKind::Story, 5, Cents(8_000)));
        let mut ben = InfluencerProposal::new(Uuid::new_v4(), "ben");
        ben.deliverables.push(DeliverableLine::new(DeliverableKind::Reel, 1, Cents(120_000)));

        assert_eq!(ana.subtotal(), Cents(140_000));
        assert_eq!(total_budget(&[ana, ben]), Cents(260_000));
    }

    #[test]
    fn test_empty_budget() {
        assert_eq!(total_budget(&[]), Cents::ZERO);
        assert_eq!(InfluencerProposal::new(Uuid::new_v4(), "x").subtotal(), Cents::ZERO);
    }
}
