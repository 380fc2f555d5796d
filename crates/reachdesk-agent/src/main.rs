//! Reachdesk — influencer-marketing operator tools
//! Entry point for the `reachdesk` binary.

mod cli;
mod commands;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reachdesk_client::HttpApiClient;
use reachdesk_common::{Currency, SessionContext};
use reachdesk_config::Config;

use crate::cli::{Cli, Command};

fn build_session(config: &Config) -> SessionContext {
    let mut session = SessionContext::new(Currency::from_code(&config.session.currency));

    if let Some(team) = config.session.team.as_deref() {
        match team.parse() {
            Ok(id) => session = session.with_team(id),
            Err(_) => tracing::warn!(team, "session.team is not a UUID; ignoring"),
        }
    }

    match std::env::var(&config.api.token_env) {
        Ok(token) if !token.trim().is_empty() => session = session.with_token(token.trim()),
        _ => tracing::warn!(
            "No API token found (set {}); requests will be anonymous",
            config.api.token_env
        ),
    }

    session
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => match Config::load() {
            Ok(c) => c,
            Err(reachdesk_config::ConfigError::NotFound(path)) => {
                eprintln!("No config at {path}; using defaults.");
                Config::default()
            }
            Err(e) => return Err(e.into()),
        },
    };

    // Initialise structured logging; RUST_LOG wins over the config file.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!(base_url = %config.api.base_url, currency = %config.session.currency, "Configuration loaded");

    let session = build_session(&config);
    let client = HttpApiClient::new(&config.api, session)?;

    match cli.command {
        Command::Kpi { proposal, select } => commands::kpi(&client, proposal, &select).await,
        Command::UserStatus { user, status, reason } => {
            commands::user_status(&client, user, status.into(), reason).await
        }
        Command::CheckUnique { field, value } => {
            commands::check_unique(client, &config, field.into(), &value).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_session_from_config() {
        let mut config = Config::default();
        config.session.currency = "EUR".into();
        config.session.team = Some("not-a-uuid".into());
        config.api.token_env = "REACHDESK_TEST_TOKEN_UNSET".into();

        let session = build_session(&config);
        assert_eq!(session.currency, Currency::from_code("EUR"));
        assert_eq!(session.team, None);
        assert_eq!(session.token(), None);
    }
}
