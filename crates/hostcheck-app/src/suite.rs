//! Suite loading shared by `check` and `roles`.

use anyhow::Context;
use hostcheck_settings::{Overrides, ResolvedSuite, RoleSummary, SUITE_SOURCE_BUILTIN};

/// Where the suite comes from.
#[derive(Clone, Debug)]
pub struct SuiteInput<'a> {
    /// Suite file contents; `None` selects the built-in roles.
    pub text: Option<&'a str>,
    /// Path the text was read from, carried into reports.
    pub source: &'a str,
    pub overrides: Overrides,
}

impl SuiteInput<'_> {
    pub fn builtin(overrides: Overrides) -> Self {
        Self {
            text: None,
            source: SUITE_SOURCE_BUILTIN,
            overrides,
        }
    }
}

/// Parse, select roles, and validate every expectation before any host is touched.
pub fn load_suite(input: SuiteInput<'_>) -> anyhow::Result<ResolvedSuite> {
    let (cfg, source) = match input.text {
        Some(text) => (
            hostcheck_settings::parse_suite_toml(text)
                .with_context(|| format!("parse suite {}", input.source))?,
            input.source,
        ),
        None => (hostcheck_settings::builtin_suite(), SUITE_SOURCE_BUILTIN),
    };

    let resolved = hostcheck_settings::resolve_suite(cfg, source, input.overrides)
        .with_context(|| format!("resolve suite {source}"))?;
    Ok(resolved)
}

/// One line per role: name, expectation count, disabled count, and whether it is selected.
pub fn format_roles(suite: &ResolvedSuite) -> String {
    let mut out = format!("suite: {}\n", suite.source);
    for RoleSummary {
        name,
        expectations,
        disabled,
    } in &suite.summaries
    {
        let marker = if suite.roles.contains(name) { "*" } else { " " };
        out.push_str(&format!(
            "{marker} {name:<12} {expectations:>3} expectations ({disabled} disabled)\n"
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_suite_is_used_without_text() {
        let suite = load_suite(SuiteInput::builtin(Overrides::default())).expect("load");
        assert_eq!(suite.source, "builtin");
        assert_eq!(suite.roles, vec!["solr".to_string(), "zookeeper".to_string()]);
    }

    #[test]
    fn suite_text_replaces_presets() {
        let suite = load_suite(SuiteInput {
            text: Some("[roles.kafka]\npackages = [\"java-11-openjdk\"]\n"),
            source: "hostcheck.toml",
            overrides: Overrides::default(),
        })
        .expect("load");
        assert_eq!(suite.source, "hostcheck.toml");
        assert_eq!(suite.roles, vec!["kafka".to_string()]);
        assert_eq!(suite.expectations.len(), 1);
    }

    #[test]
    fn errors_name_the_suite_source() {
        let err = load_suite(SuiteInput {
            text: Some("roles = 3"),
            source: "custom.toml",
            overrides: Overrides::default(),
        })
        .expect_err("invalid toml");
        assert!(format!("{err:#}").contains("parse suite custom.toml"));
    }

    #[test]
    fn format_roles_marks_selected_roles() {
        let suite = load_suite(SuiteInput::builtin(Overrides {
            roles: vec!["zookeeper".to_string()],
        }))
        .expect("load");
        let text = format_roles(&suite);
        assert!(text.starts_with("suite: builtin\n"));
        assert!(text.contains("  solr          13 expectations (0 disabled)\n"));
        assert!(text.contains("* zookeeper     13 expectations (2 disabled)\n"));
    }
}
