use anyhow::anyhow;
use cdr_core::fiches::{FICHES, Fiche, by_id, lookup};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FichesCommands;
use crate::output::output;

#[derive(Serialize)]
struct FicheRow {
    id: u8,
    name: &'static str,
    format: &'static str,
    duree: &'static str,
    vulnerabilite: &'static str,
}

impl From<&Fiche> for FicheRow {
    fn from(fiche: &Fiche) -> Self {
        Self {
            id: fiche.id,
            name: fiche.name,
            format: fiche.format,
            duree: fiche.duree,
            vulnerabilite: fiche.vulnerabilite,
        }
    }
}

/// Handle `cdr fiches <subcommand>`. Needs no configuration.
pub fn handle(action: &FichesCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        FichesCommands::List => {
            let rows = FICHES.iter().map(FicheRow::from).collect::<Vec<_>>();
            output(&rows, flags.format)
        }
        FichesCommands::Show(args) => {
            let fiche = find_fiche(&args.query)
                .ok_or_else(|| anyhow!("no fiche matches '{}'", args.query))?;
            output(fiche, flags.format)
        }
    }
}

/// Number, exact key, then case-insensitive match on name or key.
fn find_fiche(query: &str) -> Option<&'static Fiche> {
    let query = query.trim();
    if let Ok(id) = query.parse::<u8>() {
        return by_id(id);
    }
    if let Some(fiche) = lookup(query) {
        return Some(fiche);
    }
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return None;
    }
    FICHES.iter().find(|fiche| {
        fiche.name.to_lowercase().contains(&needle) || fiche.key.to_lowercase().contains(&needle)
    })
}
