use anyhow::{Context, bail};
use cdr_config::CredentialSource;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::KeyCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct KeyStatusResponse {
    backend: String,
    key_required: bool,
    stored: bool,
    active_source: Option<CredentialSource>,
    active_key: Option<String>,
    store: String,
}

#[derive(Serialize)]
struct KeyChangeResponse {
    stored: bool,
    store: String,
}

/// Handle `cdr key <subcommand>`.
pub fn handle(action: &KeyCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut preferences = ctx.preferences();
    match action {
        KeyCommands::Set(args) => {
            if args.key.trim().is_empty() {
                bail!("the API key must not be empty");
            }
            preferences
                .set_api_key(&args.key)
                .context("failed to store the API key")?;
            output(
                &KeyChangeResponse {
                    stored: true,
                    store: ctx.store.location(),
                },
                flags.format,
            )
        }
        KeyCommands::Clear => {
            preferences
                .clear_api_key()
                .context("failed to forget the API key")?;
            output(
                &KeyChangeResponse {
                    stored: false,
                    store: ctx.store.location(),
                },
                flags.format,
            )
        }
        KeyCommands::Status => {
            let stored = preferences.api_key()?.is_some();
            let credential = ctx.credential()?;
            output(
                &KeyStatusResponse {
                    backend: ctx.config.analysis.backend.to_string(),
                    key_required: ctx.config.analysis.requires_api_key(),
                    stored,
                    active_source: credential.as_ref().map(|c| c.source),
                    active_key: credential.as_ref().map(|c| c.masked()),
                    store: ctx.store.location(),
                },
                flags.format,
            )
        }
    }
}
