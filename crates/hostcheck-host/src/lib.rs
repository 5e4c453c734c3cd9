//! Host adapters: turn a target URI into a [`HostInspector`].
//!
//! This crate is allowed to spawn processes (`sh`, `ssh`, `docker`) and to read snapshot files.
//! It does not evaluate expectations; that stays in `hostcheck-domain`.

#![forbid(unsafe_code)]

mod command_host;
mod error;
mod probe;
mod runner;
mod snapshot;
mod target;

pub use command_host::CommandHost;
pub use error::TargetError;
pub use probe::shell_quote;
pub use runner::{CommandOutput, CommandRunner, DockerRunner, LocalRunner, SshRunner};
pub use snapshot::{
    SCHEMA_SNAPSHOT_V1, SnapshotFile, SnapshotHost, SnapshotService, SnapshotV1,
    parse_snapshot_toml,
};
pub use target::Target;

use hostcheck_domain::HostInspector;

/// Transport knobs shared by all targets opened in one run.
#[derive(Clone, Debug)]
pub struct HostOptions {
    /// ssh `ConnectTimeout`, in seconds.
    pub ssh_connect_timeout: u32,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            ssh_connect_timeout: 10,
        }
    }
}

/// Open an inspector for `target`.
///
/// Remote targets are not contacted here; an unreachable host surfaces on its first query.
pub fn open_target(
    target: &Target,
    options: &HostOptions,
) -> Result<Box<dyn HostInspector>, TargetError> {
    let host: Box<dyn HostInspector> = match target {
        Target::Local => Box::new(CommandHost::new(LocalRunner)),
        Target::Ssh { user, host, port } => Box::new(CommandHost::new(
            SshRunner::new(host.clone())
                .user(user.clone())
                .port(*port)
                .connect_timeout(options.ssh_connect_timeout),
        )),
        Target::Docker { container } => {
            Box::new(CommandHost::new(DockerRunner::new(container.clone())))
        }
        Target::Snapshot { path } => Box::new(SnapshotHost::load(path)?),
    };
    Ok(host)
}
