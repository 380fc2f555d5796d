//! reachdesk-client — API-client interfaces and their HTTP implementation.
//!
//! Every endpoint answers with the `{success, data?, error?}` envelope;
//! both branches surface here as `reachdesk_common::Result`.

pub mod api;
pub mod http;

pub use api::{
    Availability, HrmApi, InfluencerApi, InfluencerLinePayload, InfluencerQuery, NewEmployee,
    ProposalPayload, ProposalsApi, SuperadminApi, UniqueField, UserQuery,
};
pub use http::HttpApiClient;
