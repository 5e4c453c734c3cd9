//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check verifies on the host.
    pub description: &'static str,
    /// How to bring the host back in line.
    pub remediation: &'static str,
    pub examples: ExamplePair,
}

/// How a check is declared, and how to inspect the same fact by hand.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Suite TOML declaring the expectation.
    pub suite: &'static str,
    /// Shell command that shows the observed value on the host.
    pub probe: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_PACKAGE_INSTALLED => Some(explain_package_installed()),
        ids::CHECK_GROUP_EXISTS => Some(explain_group_exists()),
        ids::CHECK_USER_EXISTS => Some(explain_user_exists()),
        ids::CHECK_FILE_EXISTS => Some(explain_file_exists()),
        ids::CHECK_SYMLINK_TARGET => Some(explain_symlink_target()),
        ids::CHECK_PATH_OWNERSHIP => Some(explain_path_ownership()),
        ids::CHECK_SERVICE_STATE => Some(explain_service_state()),
        ids::CHECK_COMMAND_STATUS => Some(explain_command_status()),

        // Codes
        ids::CODE_PACKAGE_MISSING => Some(explain_package_installed()),
        ids::CODE_GROUP_MISSING => Some(explain_group_exists()),
        ids::CODE_USER_MISSING => Some(explain_user_exists()),
        ids::CODE_PRIMARY_GROUP_MISMATCH => Some(explain_primary_group_mismatch()),
        ids::CODE_PATH_MISSING => Some(explain_file_exists()),
        ids::CODE_NOT_A_SYMLINK | ids::CODE_LINK_TARGET_MISMATCH => Some(explain_symlink_target()),
        ids::CODE_OWNER_MISMATCH | ids::CODE_GROUP_MISMATCH => Some(explain_path_ownership()),
        ids::CODE_SERVICE_RUNNING_MISMATCH | ids::CODE_SERVICE_ENABLED_MISMATCH => {
            Some(explain_service_state())
        }
        ids::CODE_EXIT_STATUS_MISMATCH => Some(explain_command_status()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_PACKAGE_INSTALLED,
        ids::CHECK_GROUP_EXISTS,
        ids::CHECK_USER_EXISTS,
        ids::CHECK_FILE_EXISTS,
        ids::CHECK_SYMLINK_TARGET,
        ids::CHECK_PATH_OWNERSHIP,
        ids::CHECK_SERVICE_STATE,
        ids::CHECK_COMMAND_STATUS,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_PACKAGE_MISSING,
        ids::CODE_GROUP_MISSING,
        ids::CODE_USER_MISSING,
        ids::CODE_PRIMARY_GROUP_MISMATCH,
        ids::CODE_PATH_MISSING,
        ids::CODE_NOT_A_SYMLINK,
        ids::CODE_LINK_TARGET_MISMATCH,
        ids::CODE_OWNER_MISMATCH,
        ids::CODE_GROUP_MISMATCH,
        ids::CODE_SERVICE_RUNNING_MISMATCH,
        ids::CODE_SERVICE_ENABLED_MISMATCH,
        ids::CODE_EXIT_STATUS_MISMATCH,
    ]
}

fn explain_package_installed() -> Explanation {
    Explanation {
        title: "Package Installed",
        description: "\
Verifies that a package is installed according to the host's package manager
(rpm, dpkg or apk, whichever is present).",
        remediation: "\
Re-run the provisioning role that owns the package, or install it by hand and
then fix the role so the next run installs it too.",
        examples: ExamplePair {
            suite: r#"[roles.solr]
packages = ["lsof", "acl", "sudo"]"#,
            probe: "rpm -q lsof || dpkg-query -W -f='${Status}' lsof",
        },
    }
}

fn explain_group_exists() -> Explanation {
    Explanation {
        title: "Group Exists",
        description: "\
Verifies that a system group is known to the host's name service.

When a group is declared together with a user (`users = [{ name, group }]`)
a missing group is reported on the user check as well.",
        remediation: "\
Create the group in the provisioning role before any user or file that
references it.",
        examples: ExamplePair {
            suite: r#"[roles.solr]
groups = ["solr"]"#,
            probe: "getent group solr",
        },
    }
}

fn explain_user_exists() -> Explanation {
    Explanation {
        title: "User Exists",
        description: "\
Verifies that a system user exists. With an expected group, also verifies that
the group exists and that it is the user's primary group. Each of the three
conditions is reported separately.",
        remediation: "\
Create the user (and its group) in the provisioning role. Service users
usually need a fixed primary group so file ownership lines up.",
        examples: ExamplePair {
            suite: r#"[[roles.solr.users]]
name = "solr"
group = "solr""#,
            probe: "getent passwd solr && id -gn solr",
        },
    }
}

fn explain_primary_group_mismatch() -> Explanation {
    let mut exp = explain_user_exists();
    exp.title = "Primary Group Mismatch";
    exp
}

fn explain_file_exists() -> Explanation {
    Explanation {
        title: "Path Exists",
        description: "\
Verifies that a path exists on the host. Dangling symlinks count as missing.",
        remediation: "\
Check that the provisioning role creates the path, and that nothing later in
the run removes it.",
        examples: ExamplePair {
            suite: r#"[roles.solr]
files = ["/var/solr/data/solr.xml"]"#,
            probe: "test -e /var/solr/data/solr.xml && echo present",
        },
    }
}

fn explain_symlink_target() -> Explanation {
    Explanation {
        title: "Symlink Target",
        description: "\
Verifies that a path exists, is a symbolic link, and resolves to exactly the
expected target. The comparison is an exact string match: trailing slashes and
relative spellings are not normalized.",
        remediation: "\
Point the link at the expected release directory. A mismatch usually means the
role was run with a different version than the suite expects; update one of
them so they agree.",
        examples: ExamplePair {
            suite: r#"[[roles.solr.symlinks]]
path = "/opt/solr"
target = "/opt/solr-6.2.0""#,
            probe: "readlink -f /opt/solr",
        },
    }
}

fn explain_path_ownership() -> Explanation {
    Explanation {
        title: "Path Ownership",
        description: "\
Verifies that a path exists and is owned by the expected user and group.",
        remediation: "\
Fix ownership in the provisioning role (`chown user:group path`). Paths
created before the service user existed are a common cause.",
        examples: ExamplePair {
            suite: r#"[[roles.solr.ownership]]
user = "solr"
group = "solr"
paths = ["/var/solr", "/var/solr/logs"]"#,
            probe: "stat -c '%U:%G' /var/solr",
        },
    }
}

fn explain_service_state() -> Explanation {
    Explanation {
        title: "Service State",
        description: "\
Verifies that a service is running and enabled at boot (or whatever the suite
expects for each). Running and enabled are checked independently: an enabled
service that is not running still fails.",
        remediation: "\
Start and enable the service (`systemctl enable --now <name>`), then check its
logs if it does not stay up.",
        examples: ExamplePair {
            suite: r#"[[roles.solr.services]]
name = "solr"
running = true
enabled = true"#,
            probe: "systemctl is-active solr; systemctl is-enabled solr",
        },
    }
}

fn explain_command_status() -> Explanation {
    Explanation {
        title: "Command Exit Status",
        description: "\
Runs a read-only command on the host and verifies its exit status.",
        remediation: "\
Run the command by hand on the host and inspect its output.",
        examples: ExamplePair {
            suite: r#"[[roles.zookeeper.commands]]
command = "/opt/zookeeper/bin/zkServer.sh status"
exit_status = 0"#,
            probe: "/opt/zookeeper/bin/zkServer.sh status; echo $?",
        },
    }
}
