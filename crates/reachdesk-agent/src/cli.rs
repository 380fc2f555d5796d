//! Command-line surface of the `reachdesk` binary.

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use reachdesk_client::UniqueField;
use reachdesk_common::UserStatus;

#[derive(Debug, Parser)]
#[command(name = "reachdesk", version, about = "Reachdesk operator tools")]
pub struct Cli {
    /// Config file (defaults to $REACHDESK_CONFIG, then ./reachdesk.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Campaign KPIs for a proposal's influencers
    Kpi {
        #[arg(long)]
        proposal: Uuid,
        /// Influencers to include; all when omitted
        #[arg(long = "select")]
        select: Vec<Uuid>,
    },
    /// Change a user's account status
    UserStatus {
        #[arg(long)]
        user: Uuid,
        #[arg(long, value_enum)]
        status: StatusArg,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Check whether an employee code or e-mail is free
    CheckUnique {
        #[arg(long, value_enum)]
        field: FieldArg,
        #[arg(long)]
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Pending,
    Suspended,
    Banned,
}

impl From<StatusArg> for UserStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Active => UserStatus::Active,
            StatusArg::Pending => UserStatus::Pending,
            StatusArg::Suspended => UserStatus::Suspended,
            StatusArg::Banned => UserStatus::Banned,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    EmployeeCode,
    Email,
}

impl From<FieldArg> for UniqueField {
    fn from(f: FieldArg) -> Self {
        match f {
            FieldArg::EmployeeCode => UniqueField::EmployeeCode,
            FieldArg::Email => UniqueField::Email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_kpi_with_selection() {
        let (a, b, p) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let (a_s, b_s, p_s) = (a.to_string(), b.to_string(), p.to_string());
        let cli = Cli::try_parse_from([
            "reachdesk", "kpi", "--proposal", p_s.as_str(),
            "--select", a_s.as_str(), "--select", b_s.as_str(),
        ])
        .unwrap();
        match cli.command {
            Command::Kpi { proposal, select } => {
                assert_eq!(proposal, p);
                assert_eq!(select, vec![a, b]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_check_unique() {
        let cli = Cli::try_parse_from([
            "reachdesk", "check-unique", "--field", "employee-code", "--value", "EMP-1",
        ])
        .unwrap();
        match cli.command {
            Command::CheckUnique { field, value } => {
                assert_eq!(UniqueField::from(field), UniqueField::EmployeeCode);
                assert_eq!(value, "EMP-1");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        let user = Uuid::new_v4().to_string();
        let res = Cli::try_parse_from([
            "reachdesk", "user-status", "--user", user.as_str(), "--status", "frozen",
        ]);
        assert!(res.is_err());
    }
}
