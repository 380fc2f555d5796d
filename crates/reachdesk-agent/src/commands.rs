//! Subcommand handlers. Each prints a JSON document on success.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use reachdesk_client::{HrmApi, HttpApiClient, InfluencerApi, SuperadminApi, UniqueField};
use reachdesk_common::{
    notify::TracingNotifier, Notification, Notifier, ProposalId, ReachdeskError, StatusChange,
    UserId, UserStatus,
};
use reachdesk_config::Config;
use reachdesk_hrm::{FieldState, UniquenessValidator};
use reachdesk_kpi::SelectionBoard;

/// Report a failure the way a page would, then hand it to the caller.
fn surface(err: ReachdeskError) -> anyhow::Error {
    TracingNotifier.notify_error(&err);
    anyhow::Error::new(err)
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialising output")?;
    println!("{out}");
    Ok(())
}

pub async fn kpi(client: &HttpApiClient, proposal: ProposalId, select: &[Uuid]) -> anyhow::Result<()> {
    let influencers = client.get_proposal_influencers(proposal).await.map_err(surface)?;
    info!(proposal = %proposal, loaded = influencers.len(), "Fetched proposal influencers");

    let mut board = SelectionBoard::new(influencers);
    if select.is_empty() {
        board.select_all();
    } else {
        for id in select {
            if !board.influencers().iter().any(|i| i.id == *id) {
                warn!(influencer = %id, "Not part of this proposal; ignored");
            }
            board.toggle(*id);
        }
    }

    let currency = client.session().currency.clone();
    let kpi = board.kpi();
    print_json(&json!({
        "proposal_id": proposal,
        "kpi": kpi,
        "total_cost_formatted": currency.format(kpi.total_cost),
    }))
}

pub async fn user_status(
    client: &HttpApiClient,
    user: UserId,
    status: UserStatus,
    reason: Option<String>,
) -> anyhow::Result<()> {
    let change = StatusChange::new(status, reason).map_err(surface)?;
    let updated = client.update_user_status(user, &change).await.map_err(surface)?;
    TracingNotifier.notify(Notification::success(format!(
        "{} is now {}",
        updated.email,
        updated.status.as_str()
    )));
    print_json(&updated)
}

pub async fn check_unique(
    client: HttpApiClient,
    config: &Config,
    field: UniqueField,
    value: &str,
) -> anyhow::Result<()> {
    let api: Arc<dyn HrmApi> = Arc::new(client);
    let validator = UniquenessValidator::new(api, Duration::from_millis(config.hrm.debounce_ms));
    let state = validator
        .validate(field, value)
        .await
        .map_err(surface)?
        .unwrap_or(FieldState::Idle);

    print_json(&json!({
        "field": field.as_str(),
        "value": value.trim(),
        "result": state,
        "message": state.message(field),
    }))
}
