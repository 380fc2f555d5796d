//! reachdesk-proposals — Brand proposal authoring and review.
//!
//! The wizard collects details, influencers and deliverables, then exits by
//! saving a draft or submitting. The review model backs the proposal detail
//! page, where an operator narrows the roster and approves the campaign.

pub mod exits;
pub mod line_items;
pub mod review;
pub mod wizard;

pub use exits::WizardExit;
pub use line_items::{total_budget, DeliverableLine, InfluencerProposal};
pub use review::ProposalReview;
pub use wizard::{EditError, GateError, ProposalDraft, ProposalWizard, WizardStep};
