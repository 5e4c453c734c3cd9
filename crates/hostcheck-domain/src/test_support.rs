use crate::provider::{HostInspector, ProviderError};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug)]
pub struct FakePath {
    pub owner: String,
    pub group: String,
    pub link_target: Option<String>,
}

/// In-memory host that records every query it answers.
///
/// Queries are logged as `"<method> <key>"`, e.g. `"owner /var/solr"`.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub packages: BTreeSet<String>,
    pub groups: BTreeSet<String>,
    pub users: BTreeMap<String, String>,
    pub paths: BTreeMap<String, FakePath>,
    pub services: BTreeMap<String, (bool, bool)>,
    pub commands: BTreeMap<String, i32>,
    fail_on: BTreeSet<String>,
    log: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: &str) -> Self {
        self.packages.insert(name.to_string());
        self
    }

    pub fn with_group(mut self, name: &str) -> Self {
        self.groups.insert(name.to_string());
        self
    }

    pub fn with_user(mut self, name: &str, primary_group: &str) -> Self {
        self.users
            .insert(name.to_string(), primary_group.to_string());
        self
    }

    pub fn with_path(mut self, path: &str, owner: &str, group: &str) -> Self {
        self.paths.insert(
            path.to_string(),
            FakePath {
                owner: owner.to_string(),
                group: group.to_string(),
                link_target: None,
            },
        );
        self
    }

    pub fn with_symlink(mut self, path: &str, target: &str, owner: &str, group: &str) -> Self {
        self.paths.insert(
            path.to_string(),
            FakePath {
                owner: owner.to_string(),
                group: group.to_string(),
                link_target: Some(target.to_string()),
            },
        );
        self
    }

    pub fn with_service(mut self, name: &str, running: bool, enabled: bool) -> Self {
        self.services.insert(name.to_string(), (running, enabled));
        self
    }

    pub fn with_command(mut self, command: &str, status: i32) -> Self {
        self.commands.insert(command.to_string(), status);
        self
    }

    /// Make the query `"<method> <key>"` fail with a provider error.
    pub fn failing_on(mut self, query: &str) -> Self {
        self.fail_on.insert(query.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn was_queried(&self, query: &str) -> bool {
        self.log.borrow().iter().any(|q| q == query)
    }

    fn record(&self, method: &str, key: &str) -> Result<(), ProviderError> {
        let query = format!("{method} {key}");
        self.log.borrow_mut().push(query.clone());
        if self.fail_on.contains(&query) {
            return Err(ProviderError::query(query, "injected failure"));
        }
        Ok(())
    }

    fn path(&self, method: &str, path: &str) -> Result<&FakePath, ProviderError> {
        self.paths
            .get(path)
            .ok_or_else(|| ProviderError::query(format!("{method} {path}"), "no such path"))
    }
}

impl HostInspector for FakeHost {
    fn describe(&self) -> String {
        "fake".to_string()
    }

    fn package_installed(&self, name: &str) -> Result<bool, ProviderError> {
        self.record("package_installed", name)?;
        Ok(self.packages.contains(name))
    }

    fn group_exists(&self, name: &str) -> Result<bool, ProviderError> {
        self.record("group_exists", name)?;
        Ok(self.groups.contains(name))
    }

    fn user_exists(&self, name: &str) -> Result<bool, ProviderError> {
        self.record("user_exists", name)?;
        Ok(self.users.contains_key(name))
    }

    fn primary_group(&self, user: &str) -> Result<String, ProviderError> {
        self.record("primary_group", user)?;
        self.users
            .get(user)
            .cloned()
            .ok_or_else(|| ProviderError::query(format!("primary_group {user}"), "no such user"))
    }

    fn file_exists(&self, path: &str) -> Result<bool, ProviderError> {
        self.record("file_exists", path)?;
        Ok(self.paths.contains_key(path))
    }

    fn is_symlink(&self, path: &str) -> Result<bool, ProviderError> {
        self.record("is_symlink", path)?;
        Ok(self.path("is_symlink", path)?.link_target.is_some())
    }

    fn link_target(&self, path: &str) -> Result<String, ProviderError> {
        self.record("link_target", path)?;
        self.path("link_target", path)?
            .link_target
            .clone()
            .ok_or_else(|| ProviderError::query(format!("link_target {path}"), "not a symlink"))
    }

    fn owner(&self, path: &str) -> Result<String, ProviderError> {
        self.record("owner", path)?;
        Ok(self.path("owner", path)?.owner.clone())
    }

    fn owner_group(&self, path: &str) -> Result<String, ProviderError> {
        self.record("owner_group", path)?;
        Ok(self.path("owner_group", path)?.group.clone())
    }

    fn service_running(&self, name: &str) -> Result<bool, ProviderError> {
        self.record("service_running", name)?;
        Ok(self.services.get(name).map(|s| s.0).unwrap_or(false))
    }

    fn service_enabled(&self, name: &str) -> Result<bool, ProviderError> {
        self.record("service_enabled", name)?;
        Ok(self.services.get(name).map(|s| s.1).unwrap_or(false))
    }

    fn command_status(&self, command: &str) -> Result<i32, ProviderError> {
        self.record("command_status", command)?;
        Ok(self.commands.get(command).copied().unwrap_or(127))
    }
}
