//! `cdr wizard`: the interactive flow over stdin/stdout.
//!
//! Each screen reads what it needs, drives the controller, and returns
//! `false` once the user quits or input ends.

use std::io::{BufRead, Write};

use cdr_core::entities::ExportView;
use cdr_core::enums::{ContextQuestion, MAX_TOTAL};
use cdr_wizard::{SubmissionOutcome, WizardError, WizardStep};
use chrono::Utc;

use crate::cli::GlobalFlags;
use crate::commands::quick_test::run_questions;
use crate::commands::shared::answers::{read_consigne, resolve_context_answer};
use crate::commands::shared::prompt::{Choice, Prompter};
use crate::commands::shared::result::radar_svg;
use crate::context::{AppContext, Controller};
use crate::output::report::render_result;
use crate::progress::with_waiting_messages;
use crate::ui;

/// Handle `cdr wizard`.
pub async fn handle(ctx: &mut AppContext, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut controller = ctx.controller()?;
    let stdin = std::io::stdin();
    let prompter = Prompter::new(stdin.lock(), std::io::stdout());
    let mut session = WizardSession {
        ctx,
        controller: &mut controller,
        prompter,
        retry_pending: false,
    };
    session.run().await
}

pub struct WizardSession<'a, R, W> {
    ctx: &'a mut AppContext,
    controller: &'a mut Controller,
    prompter: Prompter<R, W>,
    /// The last submission failed; the questions screen offers a retry.
    retry_pending: bool,
}

impl<R: BufRead, W: Write> WizardSession<'_, R, W> {
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let keep_going = match self.controller.step() {
                WizardStep::Welcome => self.welcome()?,
                WizardStep::AuditInput => self.audit_input()?,
                WizardStep::AuditQuestions => self.audit_questions().await?,
                WizardStep::AuditResult => self.result_screen()?,
                WizardStep::QuickTest => self.quick_test()?,
                WizardStep::Portfolio => self.portfolio()?,
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    fn welcome(&mut self) -> anyhow::Result<bool> {
        self.prompter.say("")?;
        self.prompter.say("Compagnon de route")?;
        self.prompter
            .say("Évaluez la vulnérabilité de vos évaluations face à l'IA générative.")?;
        let portfolio = format!("Portfolio ({} résultats)", self.controller.portfolio().len());
        let options = [
            "Audit détaillé",
            "Test rapide (8 questions)",
            portfolio.as_str(),
            "Quitter",
        ];
        match self.prompter.choose("Que souhaitez-vous faire ?", &options)? {
            None | Some(Choice::Index(3)) => Ok(false),
            Some(Choice::Index(0)) => {
                self.controller.start_audit()?;
                Ok(true)
            }
            Some(Choice::Index(1)) => {
                self.controller.start_quick_test()?;
                Ok(true)
            }
            Some(Choice::Index(_)) => {
                self.controller.open_portfolio()?;
                Ok(true)
            }
            Some(Choice::Text(text)) if text.eq_ignore_ascii_case("q") => Ok(false),
            Some(Choice::Text(_)) => {
                self.prompter.say("Choix invalide.")?;
                Ok(true)
            }
        }
    }

    fn audit_input(&mut self) -> anyhow::Result<bool> {
        let Some(raw) = self
            .prompter
            .ask("Consigne de l'évaluation (texte ou @fichier, vide pour revenir) :")?
        else {
            return Ok(false);
        };
        if raw.is_empty() {
            self.controller.back()?;
            return Ok(true);
        }

        let consigne = match read_consigne(&raw) {
            Ok(consigne) => consigne,
            Err(error) => {
                self.prompter.say(&format!("{error:#}"))?;
                return Ok(true);
            }
        };
        self.controller.set_consigne(consigne)?;
        match self.controller.continue_to_questions() {
            Ok(()) => {
                self.retry_pending = false;
                Ok(true)
            }
            Err(WizardError::EmptyConsigne) => {
                self.prompter.say("La consigne est vide.")?;
                Ok(true)
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn audit_questions(&mut self) -> anyhow::Result<bool> {
        if self.retry_pending {
            if let Some(banner) = self.controller.error().cloned() {
                self.prompter.say(&format!("⚠ {}", banner.message))?;
                if banner.suggest_new_key && !self.offer_new_key()? {
                    return Ok(false);
                }
            }
            if !self.prompter.confirm("Relancer l'analyse ?", true)? {
                self.retry_pending = false;
                self.controller.back()?;
                return Ok(true);
            }
        } else {
            for question in ContextQuestion::ALL {
                match self.prompter.choose(question.prompt(), question.options())? {
                    None => return Ok(false),
                    Some(Choice::Index(index)) => {
                        let option = question.options()[index];
                        self.controller.answer_context(question, option)?;
                    }
                    Some(Choice::Text(text)) if text.is_empty() => {
                        self.controller.back()?;
                        return Ok(true);
                    }
                    Some(Choice::Text(text)) => {
                        self.controller
                            .answer_context(question, resolve_context_answer(question, &text))?;
                    }
                }
            }
            if !self.prompter.confirm("Lancer l'analyse ?", true)? {
                self.controller.back()?;
                return Ok(true);
            }
        }

        let outcome = with_waiting_messages(self.controller.submit(Utc::now())).await;
        self.retry_pending = outcome == SubmissionOutcome::Failed;
        if outcome == SubmissionOutcome::Skipped {
            self.prompter
                .say("Analyse non lancée : toutes les questions doivent avoir une réponse.")?;
        }
        Ok(true)
    }

    /// Ask for another key, store it, and rebuild the client with it.
    /// Returns `false` at end of input.
    fn offer_new_key(&mut self) -> anyhow::Result<bool> {
        let Some(key) = self
            .prompter
            .ask("Nouvelle clé API (vide pour garder la clé actuelle) :")?
        else {
            return Ok(false);
        };
        if key.is_empty() {
            return Ok(true);
        }

        if let Err(error) = self.ctx.preferences().set_api_key(&key) {
            tracing::warn!(%error, "API key could not be stored; using it for this session only");
        }
        self.ctx.override_key(key);
        self.controller.set_client(self.ctx.audit_client()?);
        self.prompter.say("Clé enregistrée.")?;
        Ok(true)
    }

    fn result_screen(&mut self) -> anyhow::Result<bool> {
        let Some(result) = self.controller.current_result().cloned() else {
            self.controller.home()?;
            return Ok(true);
        };
        self.prompter.say("")?;
        self.prompter
            .say(&render_result(&result, ui::prefs().table_color))?;
        if let Some(banner) = self.controller.error() {
            let message = format!("⚠ {}", banner.message);
            self.prompter.say(&message)?;
        }

        let options = [
            "Copier le résultat (JSON)",
            "Enregistrer le radar (SVG)",
            "Retour à l'accueil",
        ];
        match self.prompter.choose("", &options)? {
            None => Ok(false),
            Some(Choice::Index(0)) => {
                let json = serde_json::to_string_pretty(&ExportView::from(&result))?;
                self.prompter.say(&json)?;
                self.wait_for_enter()
            }
            Some(Choice::Index(1)) => {
                let default_path = format!("radar-{}.svg", result.id);
                let Some(path) = self
                    .prompter
                    .ask(&format!("Fichier ({default_path}) :"))?
                else {
                    return Ok(false);
                };
                let path = if path.is_empty() { default_path } else { path };
                match std::fs::write(&path, radar_svg(&result)) {
                    Ok(()) => self.prompter.say(&format!("Radar enregistré dans {path}"))?,
                    Err(error) => self.prompter.say(&format!("Échec de l'écriture : {error}"))?,
                }
                self.wait_for_enter()
            }
            Some(_) => {
                self.controller.home()?;
                Ok(true)
            }
        }
    }

    fn wait_for_enter(&mut self) -> anyhow::Result<bool> {
        Ok(self.prompter.ask("(Entrée pour continuer)")?.is_some())
    }

    fn quick_test(&mut self) -> anyhow::Result<bool> {
        self.prompter.say("")?;
        self.prompter
            .say("Test rapide : répondez oui, partiellement ou non.")?;
        run_questions(self.controller, &mut self.prompter, true)
    }

    fn portfolio(&mut self) -> anyhow::Result<bool> {
        self.prompter.say("")?;
        let entries = self.controller.portfolio().entries();
        if entries.is_empty() {
            self.prompter.say("(portfolio vide)")?;
        }
        let lines = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                format!(
                    "  {}. {}  {:>2}/{MAX_TOTAL}  {}  {}",
                    index + 1,
                    entry.date.format("%d/%m/%Y"),
                    entry.score_total,
                    entry.statut.label(),
                    entry.title
                )
            })
            .collect::<Vec<_>>();
        let ids = entries.iter().map(|e| e.id.clone()).collect::<Vec<_>>();
        for line in &lines {
            self.prompter.say(line)?;
        }

        let Some(answer) = self.prompter.ask(
            "Numéro pour ouvrir, s<numéro> pour supprimer, « vider » pour tout effacer, vide pour revenir :",
        )?
        else {
            return Ok(false);
        };

        let pick = |raw: &str| {
            raw.trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| ids.get(index))
        };

        if answer.is_empty() {
            self.controller.home()?;
        } else if answer.eq_ignore_ascii_case("vider") {
            let question = format!("Supprimer les {} résultats ?", ids.len());
            let confirmed = self.prompter.confirm(&question, false)?;
            match self.controller.clear_portfolio(confirmed) {
                Ok(true) => self.prompter.say("Portfolio vidé.")?,
                Ok(false) => {}
                Err(error) => self.storage_failure("Portfolio non vidé", &error)?,
            }
        } else if let Some(id) = answer
            .strip_prefix(['s', 'S'])
            .and_then(pick)
        {
            match self.controller.remove_entry(id) {
                Ok(_) => self.prompter.say("Résultat supprimé.")?,
                Err(error) => self.storage_failure("Résultat non supprimé", &error)?,
            }
        } else if let Some(id) = pick(&answer) {
            self.controller.open_entry(id)?;
        } else {
            self.prompter.say("Choix invalide.")?;
        }
        Ok(true)
    }

    /// A failed portfolio write is reported and the session carries on.
    fn storage_failure(&mut self, what: &str, error: &WizardError) -> anyhow::Result<()> {
        tracing::warn!(%error, "portfolio update failed");
        self.prompter.say(&format!("⚠ {what} : {error}"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use cdr_config::CdrConfig;
    use cdr_core::enums::AnswerWeight;
    use cdr_core::quick_test::QuickTest;
    use cdr_store::FileStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::OutputFormat;
    use crate::context::AppStore;

    fn context() -> AppContext {
        let flags = GlobalFlags {
            format: OutputFormat::Table,
            quiet: true,
            verbose: false,
            api_key: None,
            data_dir: None,
            ephemeral: true,
        };
        AppContext::init(CdrConfig::default(), &flags)
    }

    async fn drive(ctx: &mut AppContext, controller: &mut Controller, input: &str) -> String {
        let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let mut session = WizardSession {
            ctx,
            controller,
            prompter,
            retry_pending: false,
        };
        session.run().await.unwrap();
        String::from_utf8(session.prompter.into_output()).unwrap()
    }

    #[tokio::test]
    async fn quick_test_lands_in_portfolio_and_back_home() {
        let mut ctx = context();
        let mut controller = ctx.controller().unwrap();
        let input = [
            "2",                                          // test rapide
            "non", "non", "non", "non", "non", "non", "non", "non",
            "3",                                          // accueil
            "3",                                          // portfolio
            "",                                           // accueil
            "4",                                          // quitter
        ]
        .join("\n");

        let shown = drive(&mut ctx, &mut controller, &input).await;

        assert_eq!(controller.step(), WizardStep::Welcome);
        assert_eq!(controller.portfolio().len(), 1);
        assert!(shown.contains("Robustesse : 12/12  Robuste"));
        assert!(shown.contains("12/12  Robuste  Autodiagnostic rapide"));
        assert!(shown.contains("Portfolio (1 résultats)"));
    }

    #[tokio::test]
    async fn missing_key_keeps_the_questions_and_offers_a_retry() {
        let mut ctx = context();
        let mut controller = ctx.controller().unwrap();
        let input = [
            "1",                        // audit détaillé
            "Rédigez un rapport de 5 pages sur la gestion de projet agile.",
            "3", "3", "3",              // contexte
            "",                         // lancer (oui)
            "",                         // pas de nouvelle clé
            "n",                        // ne pas relancer
            "",                         // consigne vide : accueil
            "q",
        ]
        .join("\n");

        let shown = drive(&mut ctx, &mut controller, &input).await;

        assert!(shown.contains("⚠ Aucune clé API configurée"));
        assert_eq!(controller.step(), WizardStep::Welcome);
        assert!(controller.portfolio().is_empty());
        assert_eq!(ctx.preferences().api_key().unwrap(), None);
    }

    #[tokio::test]
    async fn entering_a_key_rebuilds_the_client() {
        let mut ctx = context();
        let mut controller = ctx.controller().unwrap();
        let input = [
            "1",
            "Dissertation sur la Révolution française",
            "1", "Données d'un stage", "2",
            "",
            "AIza-test-key",            // nouvelle clé
            "n",
            "",
            "q",
        ]
        .join("\n");

        let shown = drive(&mut ctx, &mut controller, &input).await;

        assert!(shown.contains("Clé enregistrée."));
        assert_eq!(
            ctx.credential().unwrap().map(|c| c.key).as_deref(),
            Some("AIza-test-key")
        );
    }

    #[tokio::test]
    async fn portfolio_entries_can_be_opened_and_removed() {
        let mut ctx = context();
        let mut controller = ctx.controller().unwrap();
        let mut input = vec!["2"];
        input.extend(["oui"; 8]);
        input.extend([
            "3",  // accueil
            "3",  // portfolio
            "1",  // ouvrir
            "3",  // accueil
            "3",  // portfolio
            "s1", // supprimer
            "",   // accueil
            "q",
        ]);

        let shown = drive(&mut ctx, &mut controller, &input.join("\n")).await;

        assert!(shown.contains("Robustesse : 0/12  Vulnérabilité critique"));
        assert_eq!(shown.matches("Robustesse : 0/12").count(), 2);
        assert!(shown.contains("Résultat supprimé."));
        assert!(controller.portfolio().is_empty());
    }

    #[tokio::test]
    async fn failed_portfolio_writes_keep_the_session_running() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context();
        ctx.store = AppStore::File(FileStore::new(dir.path()));

        let mut test = QuickTest::new();
        for index in 0..8 {
            test.answer(index, AnswerWeight::No).unwrap();
        }
        ctx.portfolio()
            .append(test.materialize(Utc::now()).unwrap())
            .unwrap();
        // A directory in place of the temporary file makes every write fail.
        std::fs::create_dir(dir.path().join(".compagnon.portfolio.json.tmp")).unwrap();

        let mut controller = ctx.controller().unwrap();
        let input = [
            "3",     // portfolio
            "s1",    // supprimer
            "vider",
            "oui",
            "",      // accueil
            "q",
        ]
        .join("\n");

        let shown = drive(&mut ctx, &mut controller, &input).await;

        assert!(shown.contains("⚠ Résultat non supprimé"));
        assert!(shown.contains("⚠ Portfolio non vidé"));
        assert!(!shown.contains("Résultat supprimé."));
        assert_eq!(controller.step(), WizardStep::Welcome);
        assert_eq!(controller.portfolio().len(), 1);
        assert_eq!(ctx.portfolio().len(), 1);
    }
}
