//! Three-step proposal wizard: Details → Influencers → Review.
//!
//! Forward transitions are gated; going back is always allowed. The terminal
//! exits (save as draft, submit) live in [`crate::exits`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use reachdesk_client::{InfluencerLinePayload, ProposalPayload};
use reachdesk_common::{
    BrandId, BusyFlag, Cents, Influencer, InfluencerId, ProposalStatus, ReachdeskError,
    SessionContext, ViewScope,
};

use crate::line_items::{total_budget, DeliverableLine, InfluencerProposal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Details,
    Influencers,
    Review,
}

impl WizardStep {
    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Details => Some(WizardStep::Influencers),
            WizardStep::Influencers => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    fn prev(self) -> WizardStep {
        match self {
            WizardStep::Details | WizardStep::Influencers => WizardStep::Details,
            WizardStep::Review => WizardStep::Influencers,
        }
    }
}

/// A precondition that blocked a transition or exit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Please select a brand")]
    MissingBrand,
    #[error("Please enter a proposal title")]
    MissingTitle,
    #[error("Please add a campaign description")]
    MissingDescription,
    #[error("Please add at least one influencer")]
    NoInfluencers,
    #[error("Please add at least one deliverable for {}", .usernames.join(", "))]
    MissingDeliverables { usernames: Vec<String> },
    #[error("Proposals can only be saved from the review step")]
    NotAtReview,
    #[error("Already at the last step")]
    AtLastStep,
}

/// Rejected edit to the draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("{0} is already part of this proposal")]
    DuplicateInfluencer(String),
    #[error("Influencer is not part of this proposal")]
    UnknownInfluencer,
    #[error("Deliverable #{0} does not exist")]
    UnknownDeliverable(usize),
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
    #[error("Price cannot be negative")]
    NegativePrice,
    #[error("Campaign end date is before its start date")]
    InvalidTimeline,
}

impl From<GateError> for ReachdeskError {
    fn from(e: GateError) -> Self {
        ReachdeskError::Validation(e.to_string())
    }
}

impl From<EditError> for ReachdeskError {
    fn from(e: EditError) -> Self {
        ReachdeskError::Validation(e.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub brand: Option<BrandId>,
    pub title: String,
    pub description: String,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub influencers: Vec<InfluencerProposal>,
}

impl ProposalDraft {
    fn check_details(&self) -> Result<(), GateError> {
        if self.brand.is_none() {
            return Err(GateError::MissingBrand);
        }
        if self.title.trim().is_empty() {
            return Err(GateError::MissingTitle);
        }
        Ok(())
    }

    fn check_influencers(&self) -> Result<(), GateError> {
        if self.influencers.is_empty() {
            return Err(GateError::NoInfluencers);
        }
        let usernames: Vec<String> = self
            .influencers
            .iter()
            .filter(|p| p.deliverables.is_empty())
            .map(|p| p.username.clone())
            .collect();
        if !usernames.is_empty() {
            return Err(GateError::MissingDeliverables { usernames });
        }
        Ok(())
    }

    /// Relaxed validation for "save as draft": brand and title only.
    pub fn validate_for_draft(&self) -> Result<(), GateError> {
        self.check_details()
    }

    /// Full validation for submission.
    pub fn validate_for_submit(&self) -> Result<(), GateError> {
        self.check_details()?;
        if self.description.trim().is_empty() {
            return Err(GateError::MissingDescription);
        }
        self.check_influencers()
    }

    pub fn total_budget(&self) -> Cents {
        total_budget(&self.influencers)
    }

    pub fn to_payload(&self, status: ProposalStatus) -> Result<ProposalPayload, GateError> {
        let brand_id = self.brand.ok_or(GateError::MissingBrand)?;
        let description = Some(self.description.trim().to_string()).filter(|d| !d.is_empty());
        Ok(ProposalPayload {
            brand_id,
            title: self.title.trim().to_string(),
            description,
            starts_on: self.starts_on,
            ends_on: self.ends_on,
            status,
            total_budget: self.total_budget(),
            influencers: self
                .influencers
                .iter()
                .map(|p| InfluencerLinePayload {
                    influencer_id: p.influencer_id,
                    deliverables: p.deliverables.iter().map(Into::into).collect(),
                })
                .collect(),
        })
    }
}

/// Wizard state for creating a brand proposal.
///
/// Dropping the wizard cancels any save still in flight.
#[derive(Debug)]
pub struct ProposalWizard {
    step: WizardStep,
    draft: ProposalDraft,
    pub(crate) session: SessionContext,
    pub(crate) busy: BusyFlag,
    pub(crate) scope: ViewScope,
}

impl ProposalWizard {
    pub fn new(session: SessionContext) -> Self {
        Self {
            step: WizardStep::Details,
            draft: ProposalDraft::default(),
            session,
            busy: BusyFlag::new(),
            scope: ViewScope::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ProposalDraft {
        &self.draft
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Running total, recomputed from the line items on every call.
    pub fn budget(&self) -> Cents {
        self.draft.total_budget()
    }

    /// Move forward one step if the current step's preconditions hold.
    pub fn advance(&mut self) -> Result<WizardStep, GateError> {
        let next = self.step.next().ok_or(GateError::AtLastStep)?;
        match self.step {
            WizardStep::Details => self.draft.check_details()?,
            WizardStep::Influencers => self.draft.check_influencers()?,
            WizardStep::Review => {}
        }
        tracing::debug!(from = ?self.step, to = ?next, "Wizard advanced");
        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.prev();
        self.step
    }

    // ── Details ──────────────────────────────────────────────────────────────

    pub fn set_brand(&mut self, brand: Option<BrandId>) {
        self.draft.brand = brand;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_timeline(
        &mut self,
        starts_on: Option<NaiveDate>,
        ends_on: Option<NaiveDate>,
    ) -> Result<(), EditError> {
        if let (Some(start), Some(end)) = (starts_on, ends_on) {
            if end < start {
                return Err(EditError::InvalidTimeline);
            }
        }
        self.draft.starts_on = starts_on;
        self.draft.ends_on = ends_on;
        Ok(())
    }

    // ── Influencers & deliverables ───────────────────────────────────────────

    pub fn add_influencer(&mut self, influencer: &Influencer) -> Result<(), EditError> {
        if self.position(influencer.id).is_some() {
            return Err(EditError::DuplicateInfluencer(influencer.username.clone()));
        }
        self.draft
            .influencers
            .push(InfluencerProposal::new(influencer.id, influencer.username.clone()));
        Ok(())
    }

    pub fn remove_influencer(&mut self, id: InfluencerId) -> Result<InfluencerProposal, EditError> {
        let idx = self.position(id).ok_or(EditError::UnknownInfluencer)?;
        Ok(self.draft.influencers.remove(idx))
    }

    pub fn add_deliverable(&mut self, id: InfluencerId, line: DeliverableLine) -> Result<(), EditError> {
        validate_line(&line)?;
        self.entry_mut(id)?.deliverables.push(line);
        Ok(())
    }

    pub fn update_deliverable(
        &mut self,
        id: InfluencerId,
        index: usize,
        line: DeliverableLine,
    ) -> Result<(), EditError> {
        validate_line(&line)?;
        let slot = self
            .entry_mut(id)?
            .deliverables
            .get_mut(index)
            .ok_or(EditError::UnknownDeliverable(index))?;
        *slot = line;
        Ok(())
    }

    pub fn remove_deliverable(&mut self, id: InfluencerId, index: usize) -> Result<DeliverableLine, EditError> {
        let entry = self.entry_mut(id)?;
        if index >= entry.deliverables.len() {
            return Err(EditError::UnknownDeliverable(index));
        }
        Ok(entry.deliverables.remove(index))
    }

    fn position(&self, id: InfluencerId) -> Option<usize> {
        self.draft.influencers.iter().position(|p| p.influencer_id == id)
    }

    fn entry_mut(&mut self, id: InfluencerId) -> Result<&mut InfluencerProposal, EditError> {
        self.draft
            .influencers
            .iter_mut()
            .find(|p| p.influencer_id == id)
            .ok_or(EditError::UnknownInfluencer)
    }
}

impl Drop for ProposalWizard {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

fn validate_line(line: &DeliverableLine) -> Result<(), EditError> {
    if line.quantity == 0 {
        return Err(EditError::InvalidQuantity);
    }
    if line.unit_price.is_negative() {
        return Err(EditError::NegativePrice);
    }
    Ok(())
}
