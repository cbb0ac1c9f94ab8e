use std::io::{BufRead, Write};

use anyhow::Context;

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print without prompting.
    pub fn say(&mut self, text: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{text}").context("failed to write to the terminal")
    }

    /// Ask a question and return the trimmed answer. `None` at end of input.
    pub fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{question} ").context("failed to write to the terminal")?;
        self.output.flush().context("failed to write to the terminal")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from the terminal")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Yes/no question; an empty answer takes `default`.
    pub fn confirm(&mut self, question: &str, default: bool) -> anyhow::Result<bool> {
        let hint = if default { "[O/n]" } else { "[o/N]" };
        let Some(answer) = self.ask(&format!("{question} {hint}"))? else {
            return Ok(false);
        };
        Ok(match answer.to_lowercase().as_str() {
            "" => default,
            "o" | "oui" | "y" | "yes" => true,
            _ => false,
        })
    }

    /// Numbered menu. Returns the 0-based choice, or the raw text when the
    /// answer is not a listed number. `None` at end of input.
    pub fn choose(
        &mut self,
        question: &str,
        options: &[&str],
    ) -> anyhow::Result<Option<Choice>> {
        self.say(question)?;
        for (index, option) in options.iter().enumerate() {
            self.say(&format!("  {}. {option}", index + 1))?;
        }
        let Some(answer) = self.ask(">")? else {
            return Ok(None);
        };
        let picked = answer
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .filter(|index| *index < options.len());
        Ok(Some(picked.map_or(Choice::Text(answer), Choice::Index)))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Index(usize),
    Text(String),
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn ask_trims_and_reports_end_of_input() {
        let mut p = prompter("  bonjour  \n");
        assert_eq!(p.ask("?").unwrap().as_deref(), Some("bonjour"));
        assert_eq!(p.ask("?").unwrap(), None);
    }

    #[test]
    fn confirm_uses_default_on_empty_answer() {
        let mut p = prompter("\nn\noui\n");
        assert!(p.confirm("Continuer ?", true).unwrap());
        assert!(!p.confirm("Continuer ?", true).unwrap());
        assert!(p.confirm("Continuer ?", false).unwrap());
        assert!(!p.confirm("Continuer ?", true).unwrap());
    }

    #[test]
    fn choose_lists_options_and_maps_numbers() {
        let mut p = prompter("2\n9\nlibre\n");
        let options = ["Oui", "Non"];
        assert_eq!(p.choose("Q", &options).unwrap(), Some(Choice::Index(1)));
        assert_eq!(
            p.choose("Q", &options).unwrap(),
            Some(Choice::Text("9".into()))
        );
        assert_eq!(
            p.choose("Q", &options).unwrap(),
            Some(Choice::Text("libre".into()))
        );
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("  1. Oui\n  2. Non\n"));
    }
}
