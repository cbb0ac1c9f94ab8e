//! Portfolio round trips through the file store.

use std::collections::BTreeMap;

use cdr_core::entities::{AuditResult, ContextAnswers, SubScores};
use cdr_store::{FileStore, KeyValueStore, PORTFOLIO_KEY, PortfolioStore};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn result(id: &str, scores: SubScores) -> AuditResult {
    AuditResult::new(
        id.into(),
        format!("Audit {id}"),
        "Rédigez un rapport de 5 pages sur la gestion de projet agile.".into(),
        ContextAnswers::not_applicable(),
        scores,
        vec!["Production écrite asynchrone".into()],
        Vec::new(),
        BTreeMap::new(),
        Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap(),
    )
}

#[test]
fn append_then_reload_yields_same_entries() {
    let dir = TempDir::new().unwrap();

    let mut portfolio = PortfolioStore::load(FileStore::new(dir.path()));
    portfolio.append(result("aud-1", SubScores::new(0, 0, 1, 0))).unwrap();
    portfolio.append(result("aud-2", SubScores::new(3, 3, 3, 3))).unwrap();
    let written = portfolio.entries().to_vec();

    let reloaded = PortfolioStore::load(FileStore::new(dir.path()));
    assert_eq!(reloaded.entries(), written.as_slice());
    assert_eq!(reloaded.entries()[0].id, "aud-2");
}

#[test]
fn removed_entry_stays_removed_after_reload() {
    let dir = TempDir::new().unwrap();

    let mut portfolio = PortfolioStore::load(FileStore::new(dir.path()));
    portfolio.append(result("keep", SubScores::default())).unwrap();
    portfolio.append(result("drop", SubScores::default())).unwrap();
    assert!(portfolio.remove("drop").unwrap());

    let reloaded = PortfolioStore::load(FileStore::new(dir.path()));
    assert!(reloaded.get("drop").is_none());
    assert!(reloaded.get("keep").is_some());
}

#[test]
fn clear_then_reload_is_empty() {
    let dir = TempDir::new().unwrap();

    let mut portfolio = PortfolioStore::load(FileStore::new(dir.path()));
    portfolio.append(result("a", SubScores::default())).unwrap();
    portfolio.clear().unwrap();

    let reloaded = PortfolioStore::load(FileStore::new(dir.path()));
    assert!(reloaded.is_empty());
}

#[test]
fn corrupt_file_yields_empty_portfolio() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.path_for(PORTFOLIO_KEY), "[{\"id\": 3").unwrap();

    let mut portfolio = PortfolioStore::load(store);
    assert!(portfolio.is_empty());

    // The next write replaces the unreadable data.
    portfolio.append(result("fresh", SubScores::default())).unwrap();
    let reloaded = PortfolioStore::load(FileStore::new(dir.path()));
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn persisted_format_is_a_plain_json_array() {
    let dir = TempDir::new().unwrap();

    let mut portfolio = PortfolioStore::load(FileStore::new(dir.path()));
    portfolio.append(result("aud-1", SubScores::new(1, 2, 0, 0))).unwrap();

    let raw = portfolio.into_inner().get(PORTFOLIO_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let array = value.as_array().expect("array");
    assert_eq!(array[0]["score_total"], 3);
    assert_eq!(array[0]["statut"], "Vulnérabilité critique");
}

#[test]
fn missing_data_dir_is_created_on_first_write() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");

    let mut portfolio = PortfolioStore::load(FileStore::new(&nested));
    assert!(portfolio.is_empty());
    portfolio.append(result("x", SubScores::default())).unwrap();
    assert!(nested.join("compagnon.portfolio.json").exists());
}
