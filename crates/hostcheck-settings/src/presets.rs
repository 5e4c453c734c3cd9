use crate::model::{
    CommandConfig, OwnershipConfig, RoleConfig, SCHEMA_SUITE_V1, ServiceConfig, SuiteConfigV1,
    SymlinkConfig, UserConfig,
};
use std::collections::BTreeMap;

/// Source label for suites that come from [`builtin_suite`].
pub const SUITE_SOURCE_BUILTIN: &str = "builtin";

/// Built-in roles, used when no suite file is present.
///
/// Keep these small and readable. Site-specific expectations belong in `hostcheck.toml`.
pub fn builtin_suite() -> SuiteConfigV1 {
    let mut roles = BTreeMap::new();
    roles.insert("solr".to_string(), solr_role());
    roles.insert("zookeeper".to_string(), zookeeper_role());
    SuiteConfigV1 {
        schema: Some(SCHEMA_SUITE_V1.to_string()),
        roles_enabled: None,
        roles,
    }
}

fn solr_role() -> RoleConfig {
    RoleConfig {
        packages: strings(&["lsof", "acl", "sudo"]),
        groups: strings(&["solr"]),
        users: vec![user("solr", "solr")],
        symlinks: vec![SymlinkConfig {
            path: "/opt/solr".to_string(),
            target: "/opt/solr-6.2.0".to_string(),
            disabled: None,
        }],
        ownership: vec![OwnershipConfig {
            user: "solr".to_string(),
            group: "solr".to_string(),
            paths: strings(&[
                "/opt/solr-6.2.0",
                "/opt/solr/bin",
                "/var/solr",
                "/var/solr/data/",
                "/var/solr/logs",
                "/var/solr/data/solr.xml",
            ]),
            disabled: None,
        }],
        services: vec![ServiceConfig {
            name: "solr".to_string(),
            running: true,
            enabled: true,
            disabled: None,
        }],
        ..RoleConfig::default()
    }
}

fn zookeeper_role() -> RoleConfig {
    RoleConfig {
        packages: strings(&["libselinux-python"]),
        groups: strings(&["zookeeper"]),
        users: vec![user("zookeeper", "zookeeper")],
        symlinks: vec![SymlinkConfig {
            path: "/opt/zookeeper".to_string(),
            target: "/opt/zookeeper-3.6.1".to_string(),
            disabled: None,
        }],
        ownership: vec![OwnershipConfig {
            user: "zookeeper".to_string(),
            group: "zookeeper".to_string(),
            paths: strings(&[
                "/opt/zookeeper-3.6.1",
                "/opt/zookeeper/bin",
                "/var/lib/zookeeper",
                "/var/log/zookeeper",
                "/opt/zookeeper/conf/zoo.cfg",
                "/opt/zookeeper/conf/log4j.properties",
                "/var/lib/zookeeper/myid",
            ]),
            disabled: None,
        }],
        // The service does not come up inside the test containers.
        services: vec![ServiceConfig {
            name: "zookeeper".to_string(),
            running: true,
            enabled: true,
            disabled: Some("zookeeper service is not started in test containers".to_string()),
        }],
        commands: vec![CommandConfig {
            command: "/opt/zookeeper/bin/zkServer.sh status".to_string(),
            exit_status: 0,
            disabled: Some("requires a running zookeeper service".to_string()),
        }],
        ..RoleConfig::default()
    }
}

fn user(name: &str, group: &str) -> UserConfig {
    UserConfig {
        name: name.to_string(),
        group: Some(group.to_string()),
        disabled: None,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
