use thiserror::Error;

/// Failure to query the host. Always fatal for the host session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The host could not be reached at all (connection refused, container gone, ...).
    #[error("host {target} is unavailable: {reason}")]
    Unavailable { target: String, reason: String },

    /// The host answered, but a query could not be interpreted.
    #[error("query `{query}` failed: {reason}")]
    Query { query: String, reason: String },
}

impl ProviderError {
    pub fn query(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Query {
            query: query.into(),
            reason: reason.into(),
        }
    }

    pub fn unavailable(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            target: target.into(),
            reason: reason.into(),
        }
    }
}

/// Read-only queries about a host's packages, accounts, files and services.
///
/// Implementations must not cache answers across calls: host state may change
/// between checks.
pub trait HostInspector {
    /// Human-readable target name used in reports and logs.
    fn describe(&self) -> String;

    fn package_installed(&self, name: &str) -> Result<bool, ProviderError>;

    fn group_exists(&self, name: &str) -> Result<bool, ProviderError>;

    fn user_exists(&self, name: &str) -> Result<bool, ProviderError>;

    /// Name of the user's primary group. Only asked for users that exist.
    fn primary_group(&self, user: &str) -> Result<String, ProviderError>;

    fn file_exists(&self, path: &str) -> Result<bool, ProviderError>;

    fn is_symlink(&self, path: &str) -> Result<bool, ProviderError>;

    /// Resolved target of a symlink. Only asked for paths that are symlinks.
    fn link_target(&self, path: &str) -> Result<String, ProviderError>;

    /// Owning user name. Only asked for paths that exist.
    fn owner(&self, path: &str) -> Result<String, ProviderError>;

    /// Owning group name. Only asked for paths that exist.
    fn owner_group(&self, path: &str) -> Result<String, ProviderError>;

    fn service_running(&self, name: &str) -> Result<bool, ProviderError>;

    fn service_enabled(&self, name: &str) -> Result<bool, ProviderError>;

    /// Exit status of a command run on the host.
    fn command_status(&self, command: &str) -> Result<i32, ProviderError>;
}

