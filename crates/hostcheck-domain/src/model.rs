use hostcheck_types::ids;
use thiserror::Error;

/// A single declarative fact the suite expects to hold on the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpectationRecord {
    PackageInstalled {
        name: String,
    },
    GroupExists {
        name: String,
    },
    /// With `group` set, the group must exist and be the user's primary group.
    UserExists {
        name: String,
        group: Option<String>,
    },
    FileExists {
        path: String,
    },
    SymlinkTarget {
        path: String,
        target: String,
    },
    PathOwnership {
        path: String,
        user: String,
        group: String,
    },
    ServiceState {
        name: String,
        running: bool,
        enabled: bool,
    },
    CommandStatus {
        command: String,
        exit_status: i32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExpectationError {
    #[error("{check_id}: `{field}` must not be empty")]
    EmptyField {
        check_id: &'static str,
        field: &'static str,
    },
}

impl ExpectationRecord {
    pub fn check_id(&self) -> &'static str {
        match self {
            Self::PackageInstalled { .. } => ids::CHECK_PACKAGE_INSTALLED,
            Self::GroupExists { .. } => ids::CHECK_GROUP_EXISTS,
            Self::UserExists { .. } => ids::CHECK_USER_EXISTS,
            Self::FileExists { .. } => ids::CHECK_FILE_EXISTS,
            Self::SymlinkTarget { .. } => ids::CHECK_SYMLINK_TARGET,
            Self::PathOwnership { .. } => ids::CHECK_PATH_OWNERSHIP,
            Self::ServiceState { .. } => ids::CHECK_SERVICE_STATE,
            Self::CommandStatus { .. } => ids::CHECK_COMMAND_STATUS,
        }
    }

    /// The identifying key: package, group, user, path, service or command.
    pub fn subject(&self) -> &str {
        match self {
            Self::PackageInstalled { name }
            | Self::GroupExists { name }
            | Self::UserExists { name, .. }
            | Self::ServiceState { name, .. } => name,
            Self::FileExists { path }
            | Self::SymlinkTarget { path, .. }
            | Self::PathOwnership { path, .. } => path,
            Self::CommandStatus { command, .. } => command,
        }
    }

    /// Short human label, e.g. `symlink '/opt/solr'`.
    pub fn describe(&self) -> String {
        let noun = match self {
            Self::PackageInstalled { .. } => "package",
            Self::GroupExists { .. } => "group",
            Self::UserExists { .. } => "user",
            Self::FileExists { .. } => "path",
            Self::SymlinkTarget { .. } => "symlink",
            Self::PathOwnership { .. } => "path",
            Self::ServiceState { .. } => "service",
            Self::CommandStatus { .. } => "command",
        };
        format!("{noun} '{}'", self.subject())
    }

    /// Keys and expected strings must be non-empty.
    pub fn validate(&self) -> Result<(), ExpectationError> {
        let check_id = self.check_id();
        let require = |field: &'static str, value: &str| {
            if value.trim().is_empty() {
                Err(ExpectationError::EmptyField { check_id, field })
            } else {
                Ok(())
            }
        };

        match self {
            Self::PackageInstalled { name } | Self::GroupExists { name } => require("name", name),
            Self::UserExists { name, group } => {
                require("name", name)?;
                match group {
                    Some(group) => require("group", group),
                    None => Ok(()),
                }
            }
            Self::FileExists { path } => require("path", path),
            Self::SymlinkTarget { path, target } => {
                require("path", path)?;
                require("target", target)
            }
            Self::PathOwnership { path, user, group } => {
                require("path", path)?;
                require("user", user)?;
                require("group", group)
            }
            Self::ServiceState { name, .. } => require("name", name),
            Self::CommandStatus { command, .. } => require("command", command),
        }
    }
}

/// An expectation as declared in a suite: the record, its role, and whether it is disabled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expectation {
    pub role: String,
    pub record: ExpectationRecord,
    /// Disabled expectations are reported as skipped and never queried.
    pub disabled: Option<String>,
}

impl Expectation {
    pub fn new(role: impl Into<String>, record: ExpectationRecord) -> Self {
        Self {
            role: role.into(),
            record,
            disabled: None,
        }
    }

    pub fn disabled(mut self, reason: impl Into<String>) -> Self {
        self.disabled = Some(reason.into());
        self
    }
}

/// Values observed on the host for one expectation.
///
/// Produced fresh by every check; never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostFact {
    Package(PackageFact),
    Group(ExistsFact),
    User(ExistsFact),
    UserGroup(UserGroupFact),
    File(ExistsFact),
    Symlink(SymlinkFact),
    Ownership(OwnershipFact),
    Service(ServiceFact),
    Command(CommandFact),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackageFact {
    pub installed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExistsFact {
    pub exists: bool,
}

// Optional fields are `None` when an earlier query already decided the
// outcome: the primary group of a missing user is never asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserGroupFact {
    pub group_exists: bool,
    pub user_exists: bool,
    pub primary_group: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymlinkFact {
    pub exists: bool,
    pub is_symlink: Option<bool>,
    pub target: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnershipFact {
    pub exists: bool,
    pub owner: Option<String>,
    pub group: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceFact {
    pub running: bool,
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandFact {
    pub exit_status: i32,
}
