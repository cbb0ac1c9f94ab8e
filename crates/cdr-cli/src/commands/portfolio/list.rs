use cdr_core::entities::AuditResult;
use cdr_core::enums::MAX_TOTAL;
use cdr_store::PortfolioStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppStore;
use crate::output::output;

#[derive(Serialize)]
struct PortfolioRow<'a> {
    id: &'a str,
    date: String,
    title: &'a str,
    score: String,
    statut: &'static str,
}

impl<'a> From<&'a AuditResult> for PortfolioRow<'a> {
    fn from(result: &'a AuditResult) -> Self {
        Self {
            id: &result.id,
            date: result.date.format("%Y-%m-%d").to_string(),
            title: &result.title,
            score: format!("{}/{MAX_TOTAL}", result.score_total),
            statut: result.statut.label(),
        }
    }
}

/// Handle `cdr portfolio list`: newest first.
pub fn handle(portfolio: &PortfolioStore<AppStore>, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = portfolio
        .entries()
        .iter()
        .map(PortfolioRow::from)
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}
