use crate::error::SuiteError;
use crate::model::{RoleConfig, SCHEMA_SUITE_V1, SuiteConfigV1};
use hostcheck_domain::{Expectation, ExpectationRecord};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// Roles selected on the command line; empty means "use the suite's selection".
    pub roles: Vec<String>,
}

/// Per-role counts, for listing what a suite contains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleSummary {
    pub name: String,
    pub expectations: usize,
    pub disabled: usize,
}

#[derive(Clone, Debug)]
pub struct ResolvedSuite {
    /// Where the suite came from: a file path or `builtin`.
    pub source: String,
    /// Selected roles, in evaluation (name) order.
    pub roles: Vec<String>,
    pub expectations: Vec<Expectation>,
    /// Every role in the suite, selected or not.
    pub summaries: Vec<RoleSummary>,
}

pub fn resolve_suite(
    cfg: SuiteConfigV1,
    source: &str,
    overrides: Overrides,
) -> Result<ResolvedSuite, SuiteError> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_SUITE_V1
    {
        return Err(SuiteError::UnknownSchema(schema.to_string()));
    }

    // Expand and validate every role, not only the selected ones, so a broken
    // suite is reported no matter which roles a run asks for.
    let mut expanded = Vec::with_capacity(cfg.roles.len());
    for (name, role) in &cfg.roles {
        expanded.push((name.clone(), expand_role(name, role)?));
    }

    let requested = if !overrides.roles.is_empty() {
        overrides.roles
    } else if let Some(enabled) = cfg.roles_enabled {
        enabled
    } else {
        cfg.roles.keys().cloned().collect()
    };

    let mut selected = BTreeSet::new();
    for role in requested {
        if !cfg.roles.contains_key(&role) {
            return Err(SuiteError::UnknownRole {
                role,
                available: cfg.roles.keys().cloned().collect::<Vec<_>>().join(", "),
            });
        }
        selected.insert(role);
    }

    let summaries = expanded
        .iter()
        .map(|(name, exps)| RoleSummary {
            name: name.clone(),
            expectations: exps.len(),
            disabled: exps.iter().filter(|e| e.disabled.is_some()).count(),
        })
        .collect();

    // `expanded` follows the BTreeMap, so roles come out in name order.
    let expectations: Vec<Expectation> = expanded
        .into_iter()
        .filter(|(name, _)| selected.contains(name))
        .flat_map(|(_, exps)| exps)
        .collect();

    if expectations.is_empty() {
        return Err(SuiteError::EmptySelection);
    }

    Ok(ResolvedSuite {
        source: source.to_string(),
        roles: selected.into_iter().collect(),
        expectations,
        summaries,
    })
}

/// Flatten one role into expectations, in the fixed kind order.
fn expand_role(role: &str, cfg: &RoleConfig) -> Result<Vec<Expectation>, SuiteError> {
    let mut out = Vec::new();
    let mut push = |entry: String,
                    record: ExpectationRecord,
                    disabled: Option<&String>|
     -> Result<(), SuiteError> {
        record
            .validate()
            .map_err(|source| SuiteError::Malformed {
                role: role.to_string(),
                entry,
                source,
            })?;
        let mut exp = Expectation::new(role, record);
        if let Some(reason) = disabled {
            exp = exp.disabled(reason.clone());
        }
        out.push(exp);
        Ok(())
    };

    for (i, name) in cfg.packages.iter().enumerate() {
        let record = ExpectationRecord::PackageInstalled { name: name.clone() };
        push(format!("packages[{i}]"), record, None)?;
    }
    for (i, name) in cfg.groups.iter().enumerate() {
        let record = ExpectationRecord::GroupExists { name: name.clone() };
        push(format!("groups[{i}]"), record, None)?;
    }
    for (i, u) in cfg.users.iter().enumerate() {
        let record = ExpectationRecord::UserExists {
            name: u.name.clone(),
            group: u.group.clone(),
        };
        push(format!("users[{i}]"), record, u.disabled.as_ref())?;
    }
    for (i, s) in cfg.symlinks.iter().enumerate() {
        let record = ExpectationRecord::SymlinkTarget {
            path: s.path.clone(),
            target: s.target.clone(),
        };
        push(format!("symlinks[{i}]"), record, s.disabled.as_ref())?;
    }
    for (i, path) in cfg.files.iter().enumerate() {
        let record = ExpectationRecord::FileExists { path: path.clone() };
        push(format!("files[{i}]"), record, None)?;
    }
    for (i, o) in cfg.ownership.iter().enumerate() {
        if o.paths.is_empty() {
            return Err(SuiteError::EmptyPaths {
                role: role.to_string(),
                entry: format!("ownership[{i}]"),
            });
        }
        for (j, path) in o.paths.iter().enumerate() {
            let record = ExpectationRecord::PathOwnership {
                path: path.clone(),
                user: o.user.clone(),
                group: o.group.clone(),
            };
            push(format!("ownership[{i}].paths[{j}]"), record, o.disabled.as_ref())?;
        }
    }
    for (i, s) in cfg.services.iter().enumerate() {
        let record = ExpectationRecord::ServiceState {
            name: s.name.clone(),
            running: s.running,
            enabled: s.enabled,
        };
        push(format!("services[{i}]"), record, s.disabled.as_ref())?;
    }
    for (i, c) in cfg.commands.iter().enumerate() {
        let record = ExpectationRecord::CommandStatus {
            command: c.command.clone(),
            exit_status: c.exit_status,
        };
        push(format!("commands[{i}]"), record, c.disabled.as_ref())?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builtin_suite, parse_suite_toml};
    use hostcheck_domain::ExpectationError;

    fn roles(names: &[&str]) -> Overrides {
        Overrides {
            roles: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn builtin_solr_expands_in_kind_order() {
        let resolved =
            resolve_suite(builtin_suite(), "builtin", roles(&["solr"])).expect("resolve");

        let kinds: Vec<&str> = resolved
            .expectations
            .iter()
            .map(|e| e.record.check_id())
            .collect();
        assert_eq!(resolved.roles, vec!["solr".to_string()]);
        // 3 packages, 1 group, 1 user, 1 symlink, 6 ownership paths, 1 service
        assert_eq!(kinds.len(), 13);
        assert_eq!(kinds[0], "host.package_installed");
        assert_eq!(kinds[3], "host.group_exists");
        assert_eq!(kinds[4], "host.user_exists");
        assert_eq!(kinds[5], "host.symlink_target");
        assert_eq!(kinds[6], "host.path_ownership");
        assert_eq!(kinds[12], "host.service_state");
        assert!(resolved.expectations.iter().all(|e| e.disabled.is_none()));
    }

    #[test]
    fn builtin_zookeeper_keeps_service_and_command_disabled() {
        let resolved =
            resolve_suite(builtin_suite(), "builtin", roles(&["zookeeper"])).expect("resolve");

        let disabled: Vec<&str> = resolved
            .expectations
            .iter()
            .filter(|e| e.disabled.is_some())
            .map(|e| e.record.subject())
            .collect();
        assert_eq!(
            disabled,
            vec!["zookeeper", "/opt/zookeeper/bin/zkServer.sh status"]
        );
    }

    #[test]
    fn all_roles_are_used_in_name_order_by_default() {
        let resolved = resolve_suite(builtin_suite(), "builtin", Overrides::default())
            .expect("resolve");
        assert_eq!(
            resolved.roles,
            vec!["solr".to_string(), "zookeeper".to_string()]
        );
        assert_eq!(resolved.expectations[0].role, "solr");
        assert_eq!(
            resolved.expectations.last().map(|e| e.role.as_str()),
            Some("zookeeper")
        );
    }

    #[test]
    fn override_wins_over_roles_enabled() {
        let mut cfg = builtin_suite();
        cfg.roles_enabled = Some(vec!["zookeeper".to_string()]);

        let from_cfg =
            resolve_suite(cfg.clone(), "builtin", Overrides::default()).expect("resolve");
        assert_eq!(from_cfg.roles, vec!["zookeeper".to_string()]);

        let from_override = resolve_suite(cfg, "builtin", roles(&["solr"])).expect("resolve");
        assert_eq!(from_override.roles, vec!["solr".to_string()]);
    }

    #[test]
    fn override_order_does_not_change_evaluation_order() {
        let resolved = resolve_suite(builtin_suite(), "builtin", roles(&["zookeeper", "solr"]))
            .expect("resolve");
        assert_eq!(resolved.expectations[0].role, "solr");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = resolve_suite(builtin_suite(), "builtin", roles(&["kafka"]))
            .expect_err("unknown role");
        assert!(matches!(err, SuiteError::UnknownRole { ref role, .. } if role == "kafka"));
        assert!(err.to_string().contains("solr, zookeeper"));
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let mut cfg = builtin_suite();
        cfg.schema = Some("hostcheck.suite.v9".to_string());
        let err = resolve_suite(cfg, "builtin", Overrides::default()).expect_err("schema");
        assert!(matches!(err, SuiteError::UnknownSchema(_)));
    }

    #[test]
    fn empty_value_is_malformed_and_names_the_entry() {
        let cfg = parse_suite_toml(
            r#"
            [[roles.solr.symlinks]]
            path = "/opt/solr"
            target = ""
            "#,
        )
        .expect("parse");

        let err = resolve_suite(cfg, "hostcheck.toml", Overrides::default())
            .expect_err("empty target");
        match err {
            SuiteError::Malformed {
                role,
                entry,
                source,
            } => {
                assert_eq!(role, "solr");
                assert_eq!(entry, "symlinks[0]");
                assert_eq!(
                    source,
                    ExpectationError::EmptyField {
                        check_id: "host.symlink_target",
                        field: "target",
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_unselected_role_still_fails() {
        let cfg = parse_suite_toml(
            r#"
            [roles.solr]
            packages = ["lsof"]

            [roles.broken]
            groups = [" "]
            "#,
        )
        .expect("parse");
        let err = resolve_suite(cfg, "hostcheck.toml", roles(&["solr"])).expect_err("broken");
        assert!(matches!(err, SuiteError::Malformed { ref role, .. } if role == "broken"));
    }

    #[test]
    fn ownership_without_paths_is_rejected() {
        let cfg = parse_suite_toml(
            r#"
            [[roles.solr.ownership]]
            user = "solr"
            group = "solr"
            paths = []
            "#,
        )
        .expect("parse");
        let err = resolve_suite(cfg, "hostcheck.toml", Overrides::default()).expect_err("paths");
        assert!(matches!(err, SuiteError::EmptyPaths { .. }));
    }

    #[test]
    fn empty_selection_is_rejected() {
        let cfg = parse_suite_toml("[roles.solr]\n").expect("parse");
        let err = resolve_suite(cfg, "hostcheck.toml", Overrides::default()).expect_err("empty");
        assert!(matches!(err, SuiteError::EmptySelection));

        let err = resolve_suite(SuiteConfigV1::default(), "hostcheck.toml", Overrides::default())
            .expect_err("no roles");
        assert!(matches!(err, SuiteError::EmptySelection));
    }

    #[test]
    fn disabled_ownership_entry_disables_every_path() {
        let cfg = parse_suite_toml(
            r#"
            [[roles.solr.ownership]]
            user = "solr"
            group = "solr"
            paths = ["/var/solr", "/var/solr/logs"]
            disabled = "volume mounted at runtime"
            "#,
        )
        .expect("parse");
        let resolved =
            resolve_suite(cfg, "hostcheck.toml", Overrides::default()).expect("resolve");
        assert_eq!(resolved.expectations.len(), 2);
        assert!(
            resolved
                .expectations
                .iter()
                .all(|e| e.disabled.as_deref() == Some("volume mounted at runtime"))
        );
    }

    #[test]
    fn summaries_cover_unselected_roles() {
        let resolved =
            resolve_suite(builtin_suite(), "builtin", roles(&["solr"])).expect("resolve");
        assert_eq!(
            resolved.summaries,
            vec![
                RoleSummary {
                    name: "solr".to_string(),
                    expectations: 13,
                    disabled: 0,
                },
                RoleSummary {
                    name: "zookeeper".to_string(),
                    expectations: 13,
                    disabled: 2,
                },
            ]
        );
    }
}
