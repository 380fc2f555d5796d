//! Proposal detail page: loads a proposal with its influencers, lets the
//! operator pick a subset and approves the campaign.

use tracing::{info, instrument};

use reachdesk_client::{InfluencerApi, ProposalsApi};
use reachdesk_common::{
    BusyFlag, Influencer, InfluencerId, Notification, Notifier, Proposal, ProposalId,
    ReachdeskError, Result, SessionContext, ViewScope,
};
use reachdesk_kpi::{CampaignKpi, SelectionBoard};

#[derive(Debug)]
pub struct ProposalReview {
    proposal: Option<Proposal>,
    board: SelectionBoard,
    session: SessionContext,
    busy: BusyFlag,
    scope: ViewScope,
}

impl ProposalReview {
    pub fn new(session: SessionContext) -> Self {
        Self {
            proposal: None,
            board: SelectionBoard::default(),
            session,
            busy: BusyFlag::new(),
            scope: ViewScope::new(),
        }
    }

    pub fn proposal(&self) -> Option<&Proposal> {
        self.proposal.as_ref()
    }

    pub fn influencers(&self) -> &[Influencer] {
        self.board.influencers()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Fetch the proposal and its influencer roster.
    ///
    /// A failed load leaves the previous state in place; the notifier gets the
    /// message unless the view was torn down meanwhile.
    #[instrument(skip(self, api, notifier))]
    pub async fn load<A>(&mut self, api: &A, id: ProposalId, notifier: &dyn Notifier) -> Result<()>
    where
        A: InfluencerApi + ?Sized,
    {
        let fetched = {
            let _busy = self.busy.raise();
            self.scope
                .run(async {
                    let proposal = api.get_proposal(id).await?;
                    let influencers = api.get_proposal_influencers(id).await?;
                    Ok((proposal, influencers))
                })
                .await
        };

        match fetched {
            Ok((proposal, influencers)) => {
                info!(proposal_id = %proposal.id, influencers = influencers.len(), "Proposal loaded");
                self.proposal = Some(proposal);
                self.board.set_influencers(influencers);
                let dropped = self.board.prune_selection();
                if dropped > 0 {
                    tracing::debug!(dropped, "Selection pruned after reload");
                }
                Ok(())
            }
            Err(e) => {
                notifier.notify_error(&e);
                Err(e)
            }
        }
    }

    pub fn toggle(&mut self, id: InfluencerId) -> bool {
        self.board.toggle(id)
    }

    pub fn select_all(&mut self) {
        self.board.select_all();
    }

    pub fn clear_selection(&mut self) {
        self.board.clear_selection();
    }

    pub fn kpi(&mut self) -> &CampaignKpi {
        self.board.kpi()
    }

    /// Total spend of the current selection, formatted in the session currency.
    pub fn formatted_cost(&mut self) -> String {
        let cost = self.board.kpi().total_cost;
        self.session.currency.format(cost)
    }

    /// Approve the loaded proposal as a campaign.
    #[instrument(skip(self, api, notifier))]
    pub async fn approve<A>(&mut self, api: &A, notifier: &dyn Notifier) -> Result<Proposal>
    where
        A: ProposalsApi + ?Sized,
    {
        let result = self.try_approve(api).await;
        match &result {
            Ok(p) => {
                notifier.notify(Notification::success(format!("Campaign \"{}\" approved", p.title)));
                self.proposal = Some(p.clone());
            }
            Err(e) => notifier.notify_error(e),
        }
        result
    }

    async fn try_approve<A>(&self, api: &A) -> Result<Proposal>
    where
        A: ProposalsApi + ?Sized,
    {
        let id = self
            .proposal
            .as_ref()
            .map(|p| p.id)
            .ok_or_else(|| ReachdeskError::Validation("No proposal loaded".to_string()))?;
        if self.board.selection().is_empty() {
            return Err(ReachdeskError::Validation(
                "Please select at least one influencer".to_string(),
            ));
        }
        if self.busy.is_busy() {
            return Err(ReachdeskError::Validation("An update is already in progress".to_string()));
        }

        let _busy = self.busy.raise();
        self.scope.run(api.approve_campaign(id)).await
    }
}

impl Drop for ProposalReview {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
