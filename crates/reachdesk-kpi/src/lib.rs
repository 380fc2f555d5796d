//! reachdesk-kpi — Selection-driven campaign KPI aggregation.
//!
//! An operator reviewing a proposal toggles influencers in and out of a
//! selection; campaign-level metrics are derived from the selection on the
//! fly, without going back to the server.

pub mod aggregate;
pub mod board;
pub mod selection;

pub use aggregate::{aggregate, CampaignKpi, LocationSummary, REACH_FALLBACK_RATIO};
pub use board::SelectionBoard;
pub use selection::SelectionSet;
