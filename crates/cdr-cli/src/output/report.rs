//! Text rendering of results for the `table` format: the result screen of
//! the wizard, and the quick-test gauge.

use std::fmt::Write as _;

use cdr_core::entities::AuditResult;
use cdr_core::enums::{Dimension, MAX_SUB_SCORE, MAX_TOTAL};
use cdr_core::fiches;
use cdr_core::quick_test::QuickTestEstimate;

use crate::output::table::colorize_status;

fn gauge(value: u8, max: u8) -> String {
    let filled = usize::from(value.min(max));
    let empty = usize::from(max) - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

fn status_text(label: &str, color: bool) -> String {
    if color {
        colorize_status(label)
    } else {
        label.to_string()
    }
}

/// Full result screen.
#[must_use]
pub fn render_result(result: &AuditResult, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", result.title);
    let _ = writeln!(
        out,
        "{}  ·  {}",
        result.date.format("%d/%m/%Y %H:%M"),
        result.id
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Robustesse : {}/{MAX_TOTAL}  {}",
        result.score_total,
        status_text(result.statut.label(), color)
    );
    let _ = writeln!(out, "{}", result.statut.advice());

    let _ = writeln!(out);
    let _ = writeln!(out, "Dimensions");
    let width = Dimension::ALL
        .iter()
        .map(|d| d.label().chars().count())
        .max()
        .unwrap_or(0);
    for dimension in Dimension::ALL {
        let score = result.scores.get(dimension);
        let label = dimension.label();
        let pad = " ".repeat(width - label.chars().count());
        let _ = writeln!(
            out,
            "  {label}{pad}  {} {score}/{MAX_SUB_SCORE}",
            gauge(score, MAX_SUB_SCORE)
        );
        if let Some(justification) = result.justification(dimension) {
            let _ = writeln!(out, "    {justification}");
        }
    }

    if !result.points_vigilance.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Points de vigilance");
        for point in &result.points_vigilance {
            let _ = writeln!(out, "  - {point}");
        }
    }

    if !result.recommandations.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recommandations");
        for recommendation in &result.recommandations {
            let _ = writeln!(out, "  - {}", recommendation.action);
            match fiches::lookup(&recommendation.fiche) {
                Some(fiche) => {
                    let _ = writeln!(
                        out,
                        "    {} ({}, {}, vulnérabilité {})",
                        fiche.key, fiche.format, fiche.duree, fiche.vulnerabilite
                    );
                }
                None if !recommendation.fiche.is_empty() => {
                    let _ = writeln!(out, "    {}", recommendation.fiche);
                }
                None => {}
            }
        }
    }

    out.trim_end().to_string()
}

/// One-line live estimate shown while the quick test is in progress.
#[must_use]
pub fn render_estimate(estimate: &QuickTestEstimate, color: bool) -> String {
    format!(
        "[{}/{}] {} {}/{MAX_TOTAL}  {}",
        estimate.answered,
        estimate.total_questions,
        gauge(estimate.robustness, MAX_TOTAL),
        estimate.robustness,
        status_text(estimate.status.label(), color)
    )
}
