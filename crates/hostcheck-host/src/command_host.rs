use crate::probe::{Expect, NO_PACKAGE_MANAGER, Probe};
use crate::runner::CommandRunner;
use hostcheck_domain::{HostInspector, ProviderError};
use tracing::debug;

/// A [`HostInspector`] that answers every query with one shell probe.
#[derive(Clone, Debug)]
pub struct CommandHost<R> {
    runner: R,
}

impl<R: CommandRunner> CommandHost<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn run(&self, probe: &Probe) -> Result<crate::CommandOutput, ProviderError> {
        let out = self.runner.run(&probe.script)?;
        debug!(
            host = %self.runner.describe(),
            probe = %probe.script,
            status = out.status,
            "probe finished"
        );
        Ok(out)
    }

    fn boolean(&self, probe: Probe) -> Result<bool, ProviderError> {
        let out = self.run(&probe)?;
        let Expect::Boolean { false_on } = probe.expect else {
            return Err(ProviderError::query(probe.script, "probe does not answer yes/no"));
        };
        match out.status {
            0 => Ok(true),
            s if false_on.contains(&s) => Ok(false),
            s => Err(failure(&probe.script, s, &out)),
        }
    }

    fn text(&self, probe: Probe) -> Result<String, ProviderError> {
        let out = self.run(&probe)?;
        match out.status {
            0 => Ok(out.stdout.trim_end_matches(['\n', '\r']).to_string()),
            s => Err(failure(&probe.script, s, &out)),
        }
    }
}

fn failure(script: &str, status: i32, out: &crate::CommandOutput) -> ProviderError {
    let reason = match (status, out.stderr_line()) {
        (NO_PACKAGE_MANAGER, "") if script.contains("dpkg-query") => {
            "no supported package manager (rpm, dpkg, apk)".to_string()
        }
        (127, "") => "exit status 127 (command not found)".to_string(),
        (s, "") => format!("exit status {s}"),
        (s, line) => format!("exit status {s}: {line}"),
    };
    ProviderError::query(script, reason)
}

impl<R: CommandRunner> HostInspector for CommandHost<R> {
    fn describe(&self) -> String {
        self.runner.describe()
    }

    fn package_installed(&self, name: &str) -> Result<bool, ProviderError> {
        self.boolean(Probe::package_installed(name))
    }

    fn group_exists(&self, name: &str) -> Result<bool, ProviderError> {
        self.boolean(Probe::group_exists(name))
    }

    fn user_exists(&self, name: &str) -> Result<bool, ProviderError> {
        self.boolean(Probe::user_exists(name))
    }

    fn primary_group(&self, user: &str) -> Result<String, ProviderError> {
        self.text(Probe::primary_group(user))
    }

    fn file_exists(&self, path: &str) -> Result<bool, ProviderError> {
        self.boolean(Probe::file_exists(path))
    }

    fn is_symlink(&self, path: &str) -> Result<bool, ProviderError> {
        self.boolean(Probe::is_symlink(path))
    }

    fn link_target(&self, path: &str) -> Result<String, ProviderError> {
        self.text(Probe::link_target(path))
    }

    fn owner(&self, path: &str) -> Result<String, ProviderError> {
        self.text(Probe::owner(path))
    }

    fn owner_group(&self, path: &str) -> Result<String, ProviderError> {
        self.text(Probe::owner_group(path))
    }

    fn service_running(&self, name: &str) -> Result<bool, ProviderError> {
        self.boolean(Probe::service_running(name))
    }

    fn service_enabled(&self, name: &str) -> Result<bool, ProviderError> {
        self.boolean(Probe::service_enabled(name))
    }

    /// The command line runs verbatim; any exit status is an answer.
    fn command_status(&self, command: &str) -> Result<i32, ProviderError> {
        let out = self.runner.run(command)?;
        debug!(
            host = %self.runner.describe(),
            command,
            status = out.status,
            "command finished"
        );
        Ok(out.status)
    }
}
