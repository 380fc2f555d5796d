//! The operator's transient influencer selection.

use std::collections::BTreeSet;

use reachdesk_common::{Influencer, InfluencerId};

/// Set of selected influencer ids. Lives only as long as the review view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<InfluencerId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present.
    /// Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: InfluencerId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: &InfluencerId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InfluencerId> {
        self.ids.iter()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn select_all(&mut self, influencers: &[Influencer]) {
        self.ids.extend(influencers.iter().map(|i| i.id));
    }

    /// Drop ids that no longer resolve to a loaded influencer.
    /// Returns how many were dropped.
    pub fn prune(&mut self, influencers: &[Influencer]) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| influencers.iter().any(|i| &i.id == id));
        before - self.ids.len()
    }
}

impl FromIterator<InfluencerId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = InfluencerId>>(iter: I) -> Self {
        Self { ids: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reachdesk_test_utils::fixtures::influencer;
    use uuid::Uuid;

    #[test]
    fn test_toggle_twice_restores_prior_state() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut sel: SelectionSet = [a].into_iter().collect();
        let before = sel.clone();

        assert!(sel.toggle(b));
        assert!(!sel.toggle(b));
        assert_eq!(sel, before);

        assert!(!sel.toggle(a));
        assert!(sel.toggle(a));
        assert_eq!(sel, before);
    }

    #[test]
    fn test_prune_drops_stale_ids() {
        let loaded = vec![influencer("ana", 1_000).build(), influencer("ben", 2_000).build()];
        let mut sel = SelectionSet::new();
        sel.select_all(&loaded);
        sel.toggle(Uuid::new_v4());
        assert_eq!(sel.len(), 3);

        assert_eq!(sel.prune(&loaded), 1);
        assert_eq!(sel.len(), 2);
        assert!(loaded.iter().all(|i| sel.contains(&i.id)));
    }
}
