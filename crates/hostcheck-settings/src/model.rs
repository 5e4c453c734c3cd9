use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_SUITE_V1: &str = "hostcheck.suite.v1";

/// `hostcheck.toml` schema v1.
///
/// The top level is permissive so tooling can add keys; role tables reject unknown keys
/// so a misspelled expectation kind cannot silently drop checks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SuiteConfigV1 {
    /// Optional schema string for tooling (`hostcheck.suite.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Roles evaluated when no `--role` override is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles_enabled: Option<Vec<String>>,

    /// Map of role name -> expectations.
    #[serde(default)]
    pub roles: BTreeMap<String, RoleConfig>,
}

/// Expectations declared for one role.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RoleConfig {
    /// Packages that must be installed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<String>,

    /// Groups that must exist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symlinks: Vec<SymlinkConfig>,

    /// Paths that must exist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ownership: Vec<OwnershipConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceConfig>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub name: String,

    /// When set, the group must exist and be the user's primary group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Reason the expectation is kept but not evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SymlinkConfig {
    pub path: String,

    /// Fully resolved target, compared exactly.
    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OwnershipConfig {
    pub user: String,
    pub group: String,

    /// Each path becomes its own expectation, in listed order.
    pub paths: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub name: String,

    #[serde(default = "default_true")]
    pub running: bool,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
    /// Shell command line run on the target.
    pub command: String,

    #[serde(default)]
    pub exit_status: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<String>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_flags_default_to_true() {
        let cfg: SuiteConfigV1 = toml::from_str(
            r#"
            [[roles.solr.services]]
            name = "solr"
            "#,
        )
        .expect("parse");
        let svc = &cfg.roles["solr"].services[0];
        assert!(svc.running);
        assert!(svc.enabled);
        assert_eq!(svc.disabled, None);
    }

    #[test]
    fn command_exit_status_defaults_to_zero() {
        let cfg: SuiteConfigV1 = toml::from_str(
            r#"
            [[roles.zk.commands]]
            command = "/opt/zookeeper/bin/zkServer.sh status"
            disabled = "flaky in CI"
            "#,
        )
        .expect("parse");
        let cmd = &cfg.roles["zk"].commands[0];
        assert_eq!(cmd.exit_status, 0);
        assert_eq!(cmd.disabled.as_deref(), Some("flaky in CI"));
    }

    #[test]
    fn unknown_role_keys_are_rejected() {
        let err = toml::from_str::<SuiteConfigV1>(
            r#"
            [roles.solr]
            pakages = ["lsof"]
            "#,
        )
        .expect_err("typo must not be ignored");
        assert!(err.to_string().contains("pakages"));
    }

    #[test]
    fn unknown_top_level_keys_are_tolerated() {
        let cfg: SuiteConfigV1 = toml::from_str(
            r#"
            owner = "platform-team"
            [roles.solr]
            packages = ["lsof"]
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.roles["solr"].packages, vec!["lsof".to_string()]);
    }
}
