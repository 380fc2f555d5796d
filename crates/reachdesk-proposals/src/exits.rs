//! Terminal actions of the wizard: save as draft and submit.
//!
//! Both are only reachable from the review step, validate before touching
//! the network, and leave the wizard untouched on failure so the operator can
//! simply try again.

use tracing::info;

use reachdesk_client::ProposalsApi;
use reachdesk_common::{Notification, Notifier, Proposal, ProposalStatus, ReachdeskError, Result};

use crate::wizard::{GateError, ProposalWizard, WizardStep};

/// Where the caller should go after a successful exit.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardExit {
    DraftSaved(Proposal),
    Submitted(Proposal),
}

impl WizardExit {
    pub fn proposal(&self) -> &Proposal {
        match self {
            WizardExit::DraftSaved(p) | WizardExit::Submitted(p) => p,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitKind {
    Draft,
    Submit,
}

impl ProposalWizard {
    /// Save with relaxed validation (brand and title).
    pub async fn save_draft<A>(&self, api: &A, notifier: &dyn Notifier) -> Result<WizardExit>
    where
        A: ProposalsApi + ?Sized,
    {
        self.finish(api, notifier, ExitKind::Draft).await
    }

    /// Submit with full validation.
    pub async fn submit<A>(&self, api: &A, notifier: &dyn Notifier) -> Result<WizardExit>
    where
        A: ProposalsApi + ?Sized,
    {
        self.finish(api, notifier, ExitKind::Submit).await
    }

    async fn finish<A>(&self, api: &A, notifier: &dyn Notifier, kind: ExitKind) -> Result<WizardExit>
    where
        A: ProposalsApi + ?Sized,
    {
        let result = self.try_finish(api, kind).await;
        match &result {
            Ok(exit) => notifier.notify(Notification::success(self.success_message(exit))),
            Err(e) => notifier.notify_error(e),
        }
        result
    }

    async fn try_finish<A>(&self, api: &A, kind: ExitKind) -> Result<WizardExit>
    where
        A: ProposalsApi + ?Sized,
    {
        if self.step() != WizardStep::Review {
            return Err(GateError::NotAtReview.into());
        }
        if self.busy.is_busy() {
            return Err(ReachdeskError::Validation("A save is already in progress".to_string()));
        }

        let draft = self.draft();
        let status = match kind {
            ExitKind::Draft => {
                draft.validate_for_draft()?;
                ProposalStatus::Draft
            }
            ExitKind::Submit => {
                draft.validate_for_submit()?;
                ProposalStatus::Pending
            }
        };
        let payload = draft.to_payload(status)?;

        let _busy = self.busy.raise();
        let proposal = self
            .scope
            .run(async {
                match kind {
                    ExitKind::Draft => api.save_proposal_draft(&payload).await,
                    ExitKind::Submit => api.create_brand_proposal(&payload).await,
                }
            })
            .await?;

        info!(proposal_id = %proposal.id, status = ?proposal.status, "Proposal saved");
        Ok(match kind {
            ExitKind::Draft => WizardExit::DraftSaved(proposal),
            ExitKind::Submit => WizardExit::Submitted(proposal),
        })
    }

    fn success_message(&self, exit: &WizardExit) -> String {
        let proposal = exit.proposal();
        let amount = self.session.currency.format(proposal.budget_total);
        match exit {
            WizardExit::DraftSaved(_) => format!("Draft \"{}\" saved ({})", proposal.title, amount),
            WizardExit::Submitted(_) => format!("Proposal \"{}\" submitted ({})", proposal.title, amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_items::DeliverableLine;
    use pretty_assertions::assert_eq;
    use reachdesk_common::notify::RecordingNotifier;
    use reachdesk_common::{Cents, DeliverableKind, NotificationLevel, SessionContext};
    use reachdesk_test_utils::fixtures::influencer;
    use reachdesk_test_utils::MockBackend;
    use uuid::Uuid;

    /// A wizard parked on the review step with one fully specified influencer.
    fn ready_wizard() -> ProposalWizard {
        let mut w = ProposalWizard::new(SessionContext::default());
        let ana = influencer("ana", 25_000).build();
        w.set_brand(Some(Uuid::new_v4()));
        w.set_title("Q1 Campaign");
        w.advance().unwrap();
        w.add_influencer(&ana).unwrap();
        w.add_deliverable(ana.id, DeliverableLine::new(DeliverableKind::Reel, 2, Cents(60_000)))
            .unwrap();
        w.advance().unwrap();
        w
    }

    #[tokio::test]
    async fn test_submit_requires_description() {
        let api = MockBackend::new();
        let rec = RecordingNotifier::new();
        let w = ready_wizard();

        let err = w.submit(&api, &rec).await.unwrap_err();
        assert!(matches!(err, ReachdeskError::Validation(_)));
        assert_eq!(rec.last().unwrap().message, "Please add a campaign description");
        assert!(api.calls().is_empty(), "validation must run before any network call");
    }

    #[tokio::test]
    async fn test_draft_uses_relaxed_validation() {
        let api = MockBackend::new();
        let rec = RecordingNotifier::new();
        let w = ready_wizard();

        let exit = w.save_draft(&api, &rec).await.unwrap();
        assert!(matches!(exit, WizardExit::DraftSaved(_)));
        assert_eq!(api.calls(), vec!["save_proposal_draft".to_string()]);
        assert_eq!(api.payloads()[0].status, ProposalStatus::Draft);

        let toast = rec.last().unwrap();
        assert_eq!(toast.level, NotificationLevel::Success);
        assert_eq!(toast.message, "Draft \"Q1 Campaign\" saved ($1,200.00)");
    }

    #[tokio::test]
    async fn test_submit_success() {
        let api = MockBackend::new();
        let rec = RecordingNotifier::new();
        let mut w = ready_wizard();
        w.set_description("Spring launch across reels");

        let exit = w.submit(&api, &rec).await.unwrap();
        assert_eq!(exit.proposal().status, ProposalStatus::Pending);
        assert_eq!(exit.proposal().budget_total, Cents(120_000));
        assert_eq!(api.call_count("create_brand_proposal"), 1);
        assert!(!w.is_busy());
    }

    #[tokio::test]
    async fn test_server_failure_keeps_state_and_message() {
        let api = MockBackend::new();
        api.fail("create_brand_proposal", "Brand budget cap exceeded");
        let rec = RecordingNotifier::new();
        let mut w = ready_wizard();
        w.set_description("Spring launch");
        let before = w.draft().clone();

        let err = w.submit(&api, &rec).await.unwrap_err();
        assert_eq!(err.user_message(), "Brand budget cap exceeded");
        assert_eq!(rec.last().unwrap().message, "Brand budget cap exceeded");
        assert_eq!(w.draft(), &before);
        assert_eq!(w.step(), WizardStep::Review);
        assert!(!w.is_busy());

        // The operator retries manually once the backend recovers.
        api.clear_failures();
        assert!(w.submit(&api, &rec).await.is_ok());
    }

    #[tokio::test]
    async fn test_exits_only_from_review() {
        let api = MockBackend::new();
        let rec = RecordingNotifier::new();
        let mut w = ready_wizard();
        w.back();

        let err = w.save_draft(&api, &rec).await.unwrap_err();
        assert_eq!(err.user_message(), GateError::NotAtReview.to_string());
        assert!(api.calls().is_empty());
    }
}
