/// Emit warnings for `POADM_*` env vars that figment will never read.
pub fn warn_misnamed_env() {
    for warning in collect_env_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

const SECTIONS: [&str; 3] = ["GENERAL", "TRANSITIONS", "CACHE"];

fn collect_env_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut warnings = Vec::new();

    for (key, _) in env {
        let Some(rest) = key.strip_prefix("POADM_") else {
            continue;
        };
        if rest == "LOG" {
            continue;
        }

        let section = rest.split("__").next().unwrap_or_default();
        if rest.contains("__") && SECTIONS.contains(&section) {
            continue;
        }

        let hint = SECTIONS
            .iter()
            .find(|s| rest.starts_with(&format!("{s}_")))
            .map_or_else(
                || "expected POADM_<SECTION>__<FIELD>".to_string(),
                |s| format!("use double underscores (example: POADM_{s}__{})", &rest[s.len() + 1..]),
            );
        warnings.push(format!("{key} is ignored: {hint}"));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::collect_env_warnings;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| ((*key).to_string(), "1".to_string()))
            .collect()
    }

    #[test]
    fn well_formed_keys_are_silent() {
        let warnings = collect_env_warnings(env(&[
            "POADM_CACHE__MAX_ENTRIES",
            "POADM_GENERAL__DEFAULT_LIMIT",
            "POADM_LOG",
            "HOME",
        ]));
        assert!(warnings.is_empty());
    }

    #[test]
    fn single_underscore_gets_a_hint() {
        let warnings = collect_env_warnings(env(&["POADM_CACHE_MAX_ENTRIES"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("POADM_CACHE__MAX_ENTRIES"));
    }

    #[test]
    fn unknown_section_is_reported() {
        let warnings = collect_env_warnings(env(&["POADM_TURBO__MODE"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("POADM_<SECTION>__<FIELD>"));
    }
}
