use cdr_config::{CdrConfig, ENV_PREFIX, SECTIONS};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &CdrConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

/// Variables sharing the prefix that are not configuration keys.
const NON_CONFIG_KEYS: [&str; 1] = ["LOG"];

fn collect_unconfigured_warnings<I>(config: &CdrConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut env_keys = env
        .into_iter()
        .filter_map(|(key, _)| key.strip_prefix(ENV_PREFIX).map(str::to_string))
        .filter(|rest| !NON_CONFIG_KEYS.contains(&rest.as_str()))
        .collect::<Vec<_>>();
    env_keys.sort();

    let mut warnings = Vec::new();

    for rest in &env_keys {
        if let Some((section, _)) = rest.split_once("__") {
            if !SECTIONS.contains(&section.to_ascii_lowercase().as_str()) {
                warnings.push(format!(
                    "{ENV_PREFIX}{rest} is ignored: unknown section '{}' (expected one of: {}).",
                    section.to_ascii_lowercase(),
                    SECTIONS.join(", ")
                ));
            }
            continue;
        }

        let single = SECTIONS.iter().find(|section| {
            rest.to_ascii_lowercase()
                .strip_prefix(*section)
                .is_some_and(|tail| tail.starts_with('_'))
        });
        if let Some(section) = single {
            let field = &rest[section.len() + 1..];
            warnings.push(format!(
                "{ENV_PREFIX}{rest} is ignored. Use double underscores (example: {ENV_PREFIX}{}__{field}).",
                section.to_ascii_uppercase()
            ));
        }
    }

    if config.analysis.requires_api_key()
        && !config.analysis.has_api_key()
        && env_keys.iter().any(|rest| rest.starts_with("ANALYSIS_API_KEY"))
    {
        warnings.push(
            "No API key configured while COMPAGNON_ANALYSIS_API_KEY is set. Use COMPAGNON_ANALYSIS__API_KEY or `cdr key set`."
                .to_string(),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use cdr_config::CdrConfig;
    use pretty_assertions::assert_eq;

    use super::collect_unconfigured_warnings;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| ((*key).to_string(), "value".to_string()))
            .collect()
    }

    #[test]
    fn single_underscore_keys_are_flagged() {
        let warnings = collect_unconfigured_warnings(
            &CdrConfig::default(),
            env(&["COMPAGNON_STORAGE_DATA_DIR"]),
        );
        assert_eq!(
            warnings,
            vec![
                "COMPAGNON_STORAGE_DATA_DIR is ignored. Use double underscores (example: COMPAGNON_STORAGE__DATA_DIR)."
                    .to_string()
            ]
        );
    }

    #[test]
    fn missing_key_with_mistyped_variable_gets_a_hint() {
        let warnings = collect_unconfigured_warnings(
            &CdrConfig::default(),
            env(&["COMPAGNON_ANALYSIS_API_KEY"]),
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings[1].contains("cdr key set"));
    }

    #[test]
    fn unknown_sections_are_flagged() {
        let warnings =
            collect_unconfigured_warnings(&CdrConfig::default(), env(&["COMPAGNON_GEMINI__MODEL"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("unknown section 'gemini'"));
    }

    #[test]
    fn well_formed_and_unrelated_keys_are_silent() {
        let mut config = CdrConfig::default();
        config.analysis.api_key = "AIza-demo".into();
        let warnings = collect_unconfigured_warnings(
            &config,
            env(&[
                "COMPAGNON_ANALYSIS__API_KEY",
                "COMPAGNON_GENERAL__TITLE_MAX_CHARS",
                "COMPAGNON_LOG",
                "HOME",
            ]),
        );
        assert!(warnings.is_empty(), "{warnings:?}");
    }
}
