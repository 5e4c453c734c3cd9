//! Simulated hosts loaded from TOML fact files.
//!
//! Snapshots let suites be exercised without a machine: fixtures, demos, and
//! recorded states of real hosts.

use crate::error::TargetError;
use hostcheck_domain::{HostInspector, ProviderError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const SCHEMA_SNAPSHOT_V1: &str = "hostcheck.snapshot.v1";

/// Snapshot file schema v1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SnapshotV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Free-form label, e.g. the host the snapshot was taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When false, every query fails as if the host could not be reached.
    #[serde(default = "default_true")]
    pub reachable: bool,

    #[serde(default)]
    pub packages: BTreeSet<String>,

    #[serde(default)]
    pub groups: BTreeSet<String>,

    /// user name -> primary group
    #[serde(default)]
    pub users: BTreeMap<String, String>,

    /// Existing paths, symlinks included.
    #[serde(default)]
    pub files: BTreeMap<String, SnapshotFile>,

    /// Services not listed are neither running nor enabled.
    #[serde(default)]
    pub services: BTreeMap<String, SnapshotService>,

    /// command line -> exit status. Unlisted commands exit 127.
    #[serde(default)]
    pub commands: BTreeMap<String, i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SnapshotFile {
    pub owner: String,
    pub group: String,

    /// Fully resolved target when the path is a symlink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_target: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SnapshotService {
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

pub fn parse_snapshot_toml(input: &str) -> Result<SnapshotV1, toml::de::Error> {
    toml::from_str(input)
}

/// A [`HostInspector`] backed by a [`SnapshotV1`].
#[derive(Clone, Debug)]
pub struct SnapshotHost {
    label: String,
    facts: SnapshotV1,
}

impl SnapshotHost {
    pub fn new(label: impl Into<String>, facts: SnapshotV1) -> Self {
        Self {
            label: label.into(),
            facts,
        }
    }

    pub fn load(path: &str) -> Result<Self, TargetError> {
        let text = std::fs::read_to_string(path).map_err(|source| TargetError::SnapshotRead {
            path: path.to_string(),
            source,
        })?;
        let facts = parse_snapshot_toml(&text).map_err(|source| TargetError::SnapshotParse {
            path: path.to_string(),
            source,
        })?;
        if let Some(schema) = facts.schema.as_deref()
            && schema != SCHEMA_SNAPSHOT_V1
        {
            return Err(TargetError::SnapshotSchema {
                path: path.to_string(),
                schema: schema.to_string(),
            });
        }
        Ok(Self::new(format!("snapshot://{path}"), facts))
    }

    fn reach(&self) -> Result<&SnapshotV1, ProviderError> {
        if self.facts.reachable {
            Ok(&self.facts)
        } else {
            Err(ProviderError::unavailable(
                &self.label,
                "host marked unreachable in snapshot",
            ))
        }
    }

    fn file(&self, query: &str, path: &str) -> Result<&SnapshotFile, ProviderError> {
        self.reach()?
            .files
            .get(path)
            .ok_or_else(|| ProviderError::query(format!("{query} {path}"), "no such file"))
    }
}

impl HostInspector for SnapshotHost {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn package_installed(&self, name: &str) -> Result<bool, ProviderError> {
        Ok(self.reach()?.packages.contains(name))
    }

    fn group_exists(&self, name: &str) -> Result<bool, ProviderError> {
        Ok(self.reach()?.groups.contains(name))
    }

    fn user_exists(&self, name: &str) -> Result<bool, ProviderError> {
        Ok(self.reach()?.users.contains_key(name))
    }

    fn primary_group(&self, user: &str) -> Result<String, ProviderError> {
        self.reach()?
            .users
            .get(user)
            .cloned()
            .ok_or_else(|| ProviderError::query(format!("id -gn {user}"), "no such user"))
    }

    fn file_exists(&self, path: &str) -> Result<bool, ProviderError> {
        Ok(self.reach()?.files.contains_key(path))
    }

    fn is_symlink(&self, path: &str) -> Result<bool, ProviderError> {
        Ok(self
            .reach()?
            .files
            .get(path)
            .is_some_and(|f| f.link_target.is_some()))
    }

    /// Like `readlink -f`: a path that is not a link resolves to itself.
    fn link_target(&self, path: &str) -> Result<String, ProviderError> {
        let file = self.file("readlink -f", path)?;
        Ok(file.link_target.clone().unwrap_or_else(|| path.to_string()))
    }

    fn owner(&self, path: &str) -> Result<String, ProviderError> {
        Ok(self.file("stat -c %U", path)?.owner.clone())
    }

    fn owner_group(&self, path: &str) -> Result<String, ProviderError> {
        Ok(self.file("stat -c %G", path)?.group.clone())
    }

    fn service_running(&self, name: &str) -> Result<bool, ProviderError> {
        Ok(self.reach()?.services.get(name).is_some_and(|s| s.running))
    }

    fn service_enabled(&self, name: &str) -> Result<bool, ProviderError> {
        Ok(self.reach()?.services.get(name).is_some_and(|s| s.enabled))
    }

    fn command_status(&self, command: &str) -> Result<i32, ProviderError> {
        Ok(self.reach()?.commands.get(command).copied().unwrap_or(127))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLR_HOST: &str = r#"
        schema = "hostcheck.snapshot.v1"
        description = "solr_instance after provisioning"
        packages = ["lsof", "acl", "sudo"]
        groups = ["solr"]

        [users]
        solr = "solr"

        [files."/opt/solr"]
        owner = "root"
        group = "root"
        link_target = "/opt/solr-6.2.0"

        [files."/var/solr"]
        owner = "solr"
        group = "solr"

        [services.solr]
        running = true
        enabled = true

        [commands]
        "/opt/solr/bin/solr status" = 0
    "#;

    fn solr() -> SnapshotHost {
        SnapshotHost::new(
            "snapshot://solr.toml",
            parse_snapshot_toml(SOLR_HOST).expect("parse"),
        )
    }

    #[test]
    fn answers_from_recorded_facts() {
        let host = solr();
        assert_eq!(host.package_installed("lsof"), Ok(true));
        assert_eq!(host.package_installed("libselinux-python"), Ok(false));
        assert_eq!(host.group_exists("solr"), Ok(true));
        assert_eq!(host.primary_group("solr").as_deref(), Ok("solr"));
        assert_eq!(host.is_symlink("/opt/solr"), Ok(true));
        assert_eq!(host.is_symlink("/var/solr"), Ok(false));
        assert_eq!(host.link_target("/opt/solr").as_deref(), Ok("/opt/solr-6.2.0"));
        assert_eq!(host.owner("/var/solr").as_deref(), Ok("solr"));
        assert_eq!(host.service_running("solr"), Ok(true));
        assert_eq!(host.service_enabled("zookeeper"), Ok(false));
        assert_eq!(host.command_status("/opt/solr/bin/solr status"), Ok(0));
        assert_eq!(host.command_status("/opt/zookeeper/bin/zkServer.sh status"), Ok(127));
    }

    #[test]
    fn non_link_resolves_to_itself() {
        assert_eq!(solr().link_target("/var/solr").as_deref(), Ok("/var/solr"));
    }

    #[test]
    fn missing_file_metadata_is_a_query_error() {
        let err = solr().owner("/var/solr/logs").expect_err("missing");
        assert!(matches!(err, ProviderError::Query { .. }));
    }

    #[test]
    fn unreachable_snapshot_fails_every_query() {
        let facts = parse_snapshot_toml("reachable = false").expect("parse");
        let host = SnapshotHost::new("snapshot://down.toml", facts);
        let err = host.package_installed("lsof").expect_err("unreachable");
        assert_eq!(
            err,
            ProviderError::Unavailable {
                target: "snapshot://down.toml".to_string(),
                reason: "host marked unreachable in snapshot".to_string(),
            }
        );
    }

    #[test]
    fn load_reports_path_on_errors() {
        let err = SnapshotHost::load("/nonexistent/host.toml").expect_err("missing file");
        assert!(matches!(err, TargetError::SnapshotRead { .. }));
        assert!(err.to_string().contains("/nonexistent/host.toml"));

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("host.toml");
        std::fs::write(&path, "schema = \"hostcheck.snapshot.v0\"\n").expect("write");
        let err = SnapshotHost::load(path.to_str().expect("utf-8")).expect_err("schema");
        assert!(matches!(err, TargetError::SnapshotSchema { .. }));

        std::fs::write(&path, "packages = 3\n").expect("write");
        let err = SnapshotHost::load(path.to_str().expect("utf-8")).expect_err("parse");
        assert!(matches!(err, TargetError::SnapshotParse { .. }));
    }

    #[test]
    fn load_labels_host_with_uri() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("host.toml");
        std::fs::write(&path, SOLR_HOST).expect("write");
        let path = path.to_str().expect("utf-8");
        let host = SnapshotHost::load(path).expect("load");
        assert_eq!(host.describe(), format!("snapshot://{path}"));
    }
}
