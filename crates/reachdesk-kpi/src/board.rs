//! Proposal-review state: loaded influencers, the selection and a memoised KPI.

use reachdesk_common::{Influencer, InfluencerId};

use crate::aggregate::{aggregate, CampaignKpi};
use crate::selection::SelectionSet;

#[derive(Debug, Clone)]
struct CachedKpi {
    roster_revision: u64,
    selection: SelectionSet,
    kpi: CampaignKpi,
}

/// Holds what a proposal-review view works on.
///
/// `kpi()` only recomputes when the influencer list has been replaced or the
/// selection differs from the one the cached value was built from.
#[derive(Debug, Default)]
pub struct SelectionBoard {
    influencers: Vec<Influencer>,
    roster_revision: u64,
    selection: SelectionSet,
    cache: Option<CachedKpi>,
    recomputations: u64,
}

impl SelectionBoard {
    pub fn new(influencers: Vec<Influencer>) -> Self {
        Self { influencers, ..Default::default() }
    }

    pub fn influencers(&self) -> &[Influencer] {
        &self.influencers
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Replace the loaded list, e.g. after a refetch. The selection is kept as is.
    pub fn set_influencers(&mut self, influencers: Vec<Influencer>) {
        self.influencers = influencers;
        self.roster_revision += 1;
    }

    pub fn toggle(&mut self, id: InfluencerId) -> bool {
        self.selection.toggle(id)
    }

    /// Drop selected ids that are no longer in the loaded list.
    pub fn prune_selection(&mut self) -> usize {
        self.selection.prune(&self.influencers)
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.influencers);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_influencers(&self) -> impl Iterator<Item = &Influencer> {
        self.influencers.iter().filter(|i| self.selection.contains(&i.id))
    }

    pub fn kpi(&mut self) -> &CampaignKpi {
        let fresh = matches!(
            &self.cache,
            Some(c) if c.roster_revision == self.roster_revision && c.selection == self.selection
        );
        if !fresh {
            self.cache = None;
        }
        let cached = self.cache.get_or_insert_with(|| {
            self.recomputations += 1;
            tracing::trace!(
                selected = self.selection.len(),
                loaded = self.influencers.len(),
                "Recomputing campaign KPIs"
            );
            CachedKpi {
                roster_revision: self.roster_revision,
                selection: self.selection.clone(),
                kpi: aggregate(&self.influencers, &self.selection),
            }
        });
        &cached.kpi
    }

    /// Number of times the KPI was actually recomputed.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
