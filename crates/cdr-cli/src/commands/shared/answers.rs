use anyhow::{Context, bail};
use cdr_core::enums::{AnswerWeight, ContextQuestion};
use cdr_core::quick_test::QUESTION_COUNT;

/// A 1-based option number picks the fixed option; anything else is kept as
/// free text.
#[must_use]
pub fn resolve_context_answer(question: ContextQuestion, raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| question.options().get(index))
        .map_or_else(|| trimmed.to_string(), |option| (*option).to_string())
}

/// Parse a quick-test answer: a word (oui, partiellement, non and their
/// initials) or the weight itself (2, 1, 0).
pub fn parse_answer(raw: &str) -> anyhow::Result<AnswerWeight> {
    let answer = match raw.trim().to_lowercase().as_str() {
        "oui" | "o" | "yes" | "y" | "2" => AnswerWeight::Yes,
        "partiellement" | "p" | "partial" | "1" => AnswerWeight::Partially,
        "non" | "n" | "no" | "0" => AnswerWeight::No,
        other => bail!("invalid answer '{other}': expected oui, partiellement or non (2, 1, 0)"),
    };
    Ok(answer)
}

/// Parse the comma-separated `--answers` list. All questions must be answered.
pub fn parse_answer_list(raw: &str) -> anyhow::Result<Vec<AnswerWeight>> {
    let answers = raw
        .split(',')
        .enumerate()
        .map(|(index, item)| {
            parse_answer(item).with_context(|| format!("answer {} of --answers", index + 1))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if answers.len() != QUESTION_COUNT {
        bail!(
            "--answers needs {QUESTION_COUNT} answers, got {}",
            answers.len()
        );
    }
    Ok(answers)
}

/// `@path` reads the consigne from a file; anything else is the text itself.
pub fn read_consigne(raw: &str) -> anyhow::Result<String> {
    match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read consigne from {path}")),
        None => Ok(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn option_numbers_pick_fixed_options() {
        assert_eq!(
            resolve_context_answer(ContextQuestion::Synchrone, "3"),
            "Non, entièrement asynchrone"
        );
        assert_eq!(
            resolve_context_answer(ContextQuestion::Processus, " 1 "),
            "Oui documenté ET évalué"
        );
    }

    #[test]
    fn out_of_range_numbers_and_text_are_kept() {
        assert_eq!(resolve_context_answer(ContextQuestion::Donnees, "0"), "0");
        assert_eq!(resolve_context_answer(ContextQuestion::Donnees, "4"), "4");
        assert_eq!(
            resolve_context_answer(ContextQuestion::Donnees, "Données d'un stage"),
            "Données d'un stage"
        );
    }

    #[test]
    fn answers_accept_words_and_weights() {
        assert_eq!(parse_answer("Oui").unwrap(), AnswerWeight::Yes);
        assert_eq!(parse_answer("p").unwrap(), AnswerWeight::Partially);
        assert_eq!(parse_answer(" 0 ").unwrap(), AnswerWeight::No);
        assert!(parse_answer("peut-être").is_err());
    }

    #[test]
    fn answer_list_needs_every_question() {
        let answers = parse_answer_list("2,1,0,oui,non,p,2,2").unwrap();
        assert_eq!(answers.len(), 8);
        assert_eq!(answers[3], AnswerWeight::Yes);

        let short = parse_answer_list("2,1").unwrap_err();
        assert!(short.to_string().contains("needs 8 answers, got 2"));

        let bad = parse_answer_list("2,1,x,0,0,0,0,0").unwrap_err();
        assert!(format!("{bad:#}").contains("answer 3 of --answers"));
    }

    #[test]
    fn consigne_can_come_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Dissertation sur la Révolution française").unwrap();
        let raw = format!("@{}", file.path().display());
        assert_eq!(
            read_consigne(&raw).unwrap(),
            "Dissertation sur la Révolution française"
        );
        assert_eq!(read_consigne("Texte direct").unwrap(), "Texte direct");
        assert!(read_consigne("@/nonexistent/consigne.txt").is_err());
    }
}
