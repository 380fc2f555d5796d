//! Campaign KPI computation over the selected influencers.
//!
//! KPI(I, S) is a pure function of the loaded influencer list I and the
//! selection S. Only members of I whose id is in S contribute, so ids that
//! no longer resolve are ignored. Iteration follows the order of I.

use serde::{Deserialize, Serialize};
use std::fmt;

use reachdesk_common::reduce::{mean_by, sum_by};
use reachdesk_common::{Cents, GenderSplit, Influencer};

use crate::selection::SelectionSet;

/// Share of followers assumed reached when an influencer has no reach estimate.
pub const REACH_FALLBACK_RATIO: f64 = 0.1;

/// Dominant audience location of the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LocationSummary {
    /// Nothing is selected.
    NoSelection,
    /// Influencers are selected but none reports a location.
    Unknown,
    Location(String),
}

impl fmt::Display for LocationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationSummary::NoSelection => f.write_str("No influencers selected"),
            LocationSummary::Unknown => f.write_str("Unknown"),
            LocationSummary::Location(loc) => f.write_str(loc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignKpi {
    pub total_followers: u64,
    /// Mean engagement rate in percent.
    pub avg_engagement_rate: f64,
    pub estimated_reach: f64,
    pub total_cost: Cents,
    pub gender_split: GenderSplit,
    pub avg_location: LocationSummary,
    pub selected_count: usize,
}

impl Default for CampaignKpi {
    fn default() -> Self {
        Self {
            total_followers: 0,
            avg_engagement_rate: 0.0,
            estimated_reach: 0.0,
            total_cost: Cents::ZERO,
            gender_split: GenderSplit::EVEN,
            avg_location: LocationSummary::NoSelection,
            selected_count: 0,
        }
    }
}

/// Compute campaign KPIs for the current selection.
///
///   total_followers     = Σ followers
///   avg_engagement_rate = mean(engagement), 0 when empty
///   estimated_reach     = Σ (estimated_reach ?? followers × 0.1)
///   total_cost          = Σ (cost_per_post ?? 0)
///   gender_split        = (mean male, mean female) over influencers with data, else 50/50
///   avg_location        = mode(location), first-seen wins ties
///
/// Never fails; every empty or missing case degrades to a default.
pub fn aggregate(influencers: &[Influencer], selected: &SelectionSet) -> CampaignKpi {
    let picked: Vec<&Influencer> = influencers
        .iter()
        .filter(|i| selected.contains(&i.id))
        .collect();

    if picked.is_empty() {
        return CampaignKpi::default();
    }

    let total_followers = picked
        .iter()
        .fold(0u64, |acc, i| acc.saturating_add(i.followers_count));
    let avg_engagement_rate = mean_by(&picked, |i| i.engagement_rate);
    let estimated_reach: f64 = sum_by(&picked, |i| reach_of(i));
    let total_cost: Cents = sum_by(&picked, |i| i.cost_per_post.unwrap_or(Cents::ZERO));

    CampaignKpi {
        total_followers,
        avg_engagement_rate,
        estimated_reach,
        total_cost,
        gender_split: gender_split(&picked),
        avg_location: dominant_location(&picked),
        selected_count: picked.len(),
    }
}

fn reach_of(influencer: &Influencer) -> f64 {
    match influencer.estimated_reach {
        Some(reach) => reach as f64,
        None => influencer.followers_count as f64 * REACH_FALLBACK_RATIO,
    }
}

// Unweighted mean of the per-influencer splits; follower counts do not matter here.
fn gender_split(picked: &[&Influencer]) -> GenderSplit {
    let splits: Vec<GenderSplit> = picked.iter().filter_map(|i| i.gender_split).collect();
    if splits.is_empty() {
        return GenderSplit::EVEN;
    }
    GenderSplit {
        male: mean_by(&splits, |g| g.male),
        female: mean_by(&splits, |g| g.female),
    }
}

fn dominant_location(picked: &[&Influencer]) -> LocationSummary {
    // (location, count) in first-seen order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for loc in picked.iter().filter_map(|i| i.location.as_deref()) {
        match counts.iter_mut().find(|(seen, _)| *seen == loc) {
            Some((_, n)) => *n += 1,
            None => counts.push((loc, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (loc, n) in counts {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((loc, n));
        }
    }

    match best {
        Some((loc, _)) => LocationSummary::Location(loc.to_string()),
        None => LocationSummary::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reachdesk_test_utils::fixtures::influencer;
    use uuid::Uuid;

    fn select(infs: &[Influencer]) -> SelectionSet {
        infs.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_empty_selection_is_zero() {
        let loaded = vec![
            influencer("ana", 10_000).engagement(3.0).cost(50_000).build(),
            influencer("ben", 20_000).engagement(5.0).build(),
        ];
        let kpi = aggregate(&loaded, &SelectionSet::new());
        assert_eq!(kpi, CampaignKpi::default());
        assert_eq!(kpi.avg_engagement_rate, 0.0);
        assert_eq!(kpi.gender_split, GenderSplit { male: 50.0, female: 50.0 });
        assert_eq!(kpi.avg_location, LocationSummary::NoSelection);
    }

    #[test]
    fn test_empty_list_is_zero() {
        let sel: SelectionSet = [Uuid::new_v4()].into_iter().collect();
        assert_eq!(aggregate(&[], &sel), CampaignKpi::default());
    }

    #[test]
    fn test_single_selection_is_identity() {
        let ana = influencer("ana", 48_213).engagement(3.71).build();
        let loaded = vec![ana.clone(), influencer("ben", 9_000).engagement(9.9).build()];
        let sel: SelectionSet = [ana.id].into_iter().collect();

        let kpi = aggregate(&loaded, &sel);
        assert_eq!(kpi.total_followers, 48_213);
        assert_eq!(kpi.avg_engagement_rate, 3.71);
        assert_eq!(kpi.selected_count, 1);
    }

    #[test]
    fn test_engagement_mean_over_several() {
        let loaded = vec![
            influencer("ana", 1_000).engagement(2.0).build(),
            influencer("ben", 90_000).engagement(4.5).build(),
            influencer("cho", 5_000).engagement(6.1).build(),
            influencer("dee", 8_000).engagement(9.9).build(),
        ];
        let sel: SelectionSet = loaded[..3].iter().map(|i| i.id).collect();
        let kpi = aggregate(&loaded, &sel);
        assert!((kpi.avg_engagement_rate - 12.6 / 3.0).abs() < 1e-9);
        assert_eq!(kpi.total_followers, 96_000);
        assert_eq!(kpi.selected_count, 3);
    }

    #[test]
    fn test_large_totals_saturate() {
        let loaded = vec![
            influencer("ana", u64::MAX - 1).cost(i64::MAX / 2 + 1).build(),
            influencer("ben", 10).cost(i64::MAX / 2 + 1).build(),
        ];
        let kpi = aggregate(&loaded, &select(&loaded));
        assert_eq!(kpi.total_followers, u64::MAX);
        assert_eq!(kpi.total_cost, Cents(i64::MAX));
    }

    #[test]
    fn test_reach_fallback_is_ten_percent() {
        let loaded = vec![influencer("ana", 50_000).build()];
        let kpi = aggregate(&loaded, &select(&loaded));
        assert_eq!(kpi.estimated_reach, 5_000.0);
    }

    #[test]
    fn test_reach_prefers_estimate() {
        let loaded = vec![
            influencer("ana", 50_000).reach(12_000).build(),
            influencer("ben", 30_000).build(),
        ];
        let kpi = aggregate(&loaded, &select(&loaded));
        assert_eq!(kpi.estimated_reach, 15_000.0);
    }

    #[test]
    fn test_missing_cost_counts_as_zero() {
        let loaded = vec![
            influencer("ana", 1_000).cost(25_000).build(),
            influencer("ben", 1_000).build(),
            influencer("cat", 1_000).cost(17_550).build(),
        ];
        let kpi = aggregate(&loaded, &select(&loaded));
        assert_eq!(kpi.total_cost, Cents(42_550));
    }

    #[test]
    fn test_gender_mean_skips_missing() {
        let a = influencer("ana", 1_000).gender(60.0, 40.0).build();
        let b = influencer("ben", 5_000).build();
        let loaded = vec![a, b];
        let kpi = aggregate(&loaded, &select(&loaded));
        assert_eq!(kpi.gender_split, GenderSplit { male: 60.0, female: 40.0 });
    }

    #[test]
    fn test_gender_is_not_follower_weighted() {
        let loaded = vec![
            influencer("big", 1_000_000).gender(80.0, 20.0).build(),
            influencer("small", 100).gender(40.0, 60.0).build(),
        ];
        let kpi = aggregate(&loaded, &select(&loaded));
        assert_eq!(kpi.gender_split, GenderSplit { male: 60.0, female: 40.0 });
    }

    #[test]
    fn test_location_mode_and_tie_break() {
        let loaded = vec![
            influencer("a", 1).location("Berlin").build(),
            influencer("b", 1).location("Lisbon").build(),
            influencer("c", 1).build(),
            influencer("d", 1).location("Lisbon").build(),
            influencer("e", 1).location("Berlin").build(),
        ];
        // Berlin and Lisbon tie at two; Berlin was counted first.
        let kpi = aggregate(&loaded, &select(&loaded));
        assert_eq!(kpi.avg_location, LocationSummary::Location("Berlin".into()));

        let no_berlin: SelectionSet = loaded[1..4].iter().map(|i| i.id).collect();
        let kpi = aggregate(&loaded, &no_berlin);
        assert_eq!(kpi.avg_location.to_string(), "Lisbon");
    }

    #[test]
    fn test_location_sentinels_differ() {
        let loaded = vec![influencer("ana", 1_000).build()];
        let kpi = aggregate(&loaded, &select(&loaded));
        assert_eq!(kpi.avg_location, LocationSummary::Unknown);
        assert_ne!(
            LocationSummary::Unknown.to_string(),
            LocationSummary::NoSelection.to_string()
        );
    }

    #[test]
    fn test_stale_ids_are_ignored() {
        let loaded = vec![influencer("ana", 7_000).engagement(2.0).build()];
        let mut sel = select(&loaded);
        sel.toggle(Uuid::new_v4());
        let kpi = aggregate(&loaded, &sel);
        assert_eq!(kpi.total_followers, 7_000);
        assert_eq!(kpi.avg_engagement_rate, 2.0);
        assert_eq!(kpi.selected_count, 1);
    }

    #[test]
    fn test_inputs_untouched() {
        let loaded = vec![influencer("ana", 7_000).build()];
        let sel = select(&loaded);
        let (loaded_before, sel_before) = (loaded.clone(), sel.clone());
        let _ = aggregate(&loaded, &sel);
        assert_eq!(loaded, loaded_before);
        assert_eq!(sel, sel_before);
    }

    #[test]
    fn test_kpi_serialises_location_tag() {
        let json = serde_json::to_value(CampaignKpi::default()).unwrap();
        assert_eq!(json["avg_location"]["kind"], "no_selection");
        assert_eq!(json["total_cost"], 0);
    }
}
