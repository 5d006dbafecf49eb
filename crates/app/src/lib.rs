//! # Partner Onboarding Application
//!
//! Composition root: wires configuration, secret stores, the Partner API
//! client and the artifact store into the core services, and exposes the
//! two invocations (`onboard`, `verify`).

pub mod cli;
pub mod context;
pub mod logging;

use std::collections::BTreeMap;

pub use cli::{Command, USAGE};
pub use context::AppContext;

/// What an invocation prints and how the process should exit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Flat outcome fields, `status` always present.
    pub fields: BTreeMap<String, String>,
    /// Whether the process exits successfully.
    pub success: bool,
}

impl Report {
    /// Flat JSON object written to stdout.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }
}

/// Run `command` against an assembled context.
///
/// # Errors
/// Only for problems assembling the services; workflow failures are part of
/// the report.
pub async fn execute(context: &AppContext, command: &Command) -> anyhow::Result<Report> {
    match command {
        Command::Onboard { account_name } => {
            let outcome = context.onboard(account_name).await;
            Ok(Report { success: outcome.is_success(), fields: outcome.to_flat_map() })
        }
        Command::Verify { child_account_id, onboarding_id, account_id } => {
            let outcome = context
                .verification_service()
                .verify(child_account_id, onboarding_id, account_id)
                .await;
            Ok(Report { success: outcome.as_bool().unwrap_or(false), fields: outcome.to_flat_map() })
        }
        Command::Help => anyhow::bail!("help is handled before services are assembled"),
    }
}
