use anyhow::{Context, bail};
use cdr_core::enums::ContextQuestion;
use cdr_wizard::SubmissionOutcome;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::answers::{read_consigne, resolve_context_answer};
use crate::commands::shared::result::show_result;
use crate::context::AppContext;
use crate::progress::with_waiting_messages;

/// Handle `cdr audit`.
pub async fn handle(
    args: &AuditArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let consigne = read_consigne(&args.consigne)?;
    let mut controller = ctx.controller()?;

    controller.start_audit()?;
    controller.set_consigne(consigne)?;
    controller
        .continue_to_questions()
        .context("--consigne must not be empty")?;
    for (question, raw) in [
        (ContextQuestion::Synchrone, &args.synchrone),
        (ContextQuestion::Donnees, &args.donnees),
        (ContextQuestion::Processus, &args.processus),
    ] {
        controller.answer_context(question, resolve_context_answer(question, raw))?;
    }

    let outcome = with_waiting_messages(controller.submit(chrono::Utc::now())).await;
    match outcome {
        SubmissionOutcome::Completed => {
            if let Some(banner) = controller.error() {
                tracing::warn!(kind = banner.kind, "{}", banner.message);
            }
            let Some(result) = controller.current_result() else {
                bail!("audit completed without a result");
            };
            show_result(result, flags)
        }
        SubmissionOutcome::Failed => {
            let Some(banner) = controller.error() else {
                bail!("audit failed");
            };
            if banner.suggest_new_key && !banner.message.contains("cdr key set") {
                bail!(
                    "{} (set a key with `cdr key set <KEY>` or pass --api-key)",
                    banner.message
                );
            }
            bail!("{}", banner.message)
        }
        SubmissionOutcome::Skipped => {
            bail!("audit not submitted: every context question needs an answer")
        }
    }
}
