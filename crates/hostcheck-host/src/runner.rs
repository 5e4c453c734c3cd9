use hostcheck_domain::ProviderError;
use std::process::{Command, Output};

/// Result of one shell script run on a target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    fn from_output(label: &str, script: &str, output: Output) -> Result<Self, ProviderError> {
        let Some(status) = output.status.code() else {
            return Err(ProviderError::query(
                script,
                format!("{label}: terminated by signal"),
            ));
        };
        Ok(Self {
            status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// First line of stderr, for error messages.
    pub fn stderr_line(&self) -> &str {
        self.stderr.lines().next().unwrap_or("").trim()
    }
}

/// Runs a shell script on some host and reports its exit status and output.
///
/// Transport failures are [`ProviderError::Unavailable`]; the script's own exit
/// status is returned as-is for the caller to interpret.
pub trait CommandRunner {
    /// Human label for logs and reports, e.g. `ssh://solr-1`.
    fn describe(&self) -> String;

    fn run(&self, script: &str) -> Result<CommandOutput, ProviderError>;
}

/// Runs scripts on this machine via `sh -c`.
#[derive(Clone, Debug, Default)]
pub struct LocalRunner;

impl CommandRunner for LocalRunner {
    fn describe(&self) -> String {
        "local".to_string()
    }

    fn run(&self, script: &str) -> Result<CommandOutput, ProviderError> {
        let output = Command::new("sh")
            .args(["-c", script])
            .output()
            .map_err(|e| ProviderError::unavailable("local", format!("spawn sh: {e}")))?;
        CommandOutput::from_output("sh", script, output)
    }
}

/// Runs scripts over `ssh` in batch mode.
#[derive(Clone, Debug)]
pub struct SshRunner {
    host: String,
    user: Option<String>,
    port: Option<u16>,
    connect_timeout: u32,
}

/// ssh reserves 255 for its own errors (connection, auth, host key).
const SSH_TRANSPORT_FAILURE: i32 = 255;

impl SshRunner {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: None,
            port: None,
            connect_timeout: 10,
        }
    }

    pub fn user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }

    pub fn port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    pub fn connect_timeout(mut self, seconds: u32) -> Self {
        self.connect_timeout = seconds;
        self
    }

    fn destination(&self) -> String {
        match &self.user {
            Some(user) => format!("{user}@{}", self.host),
            None => self.host.clone(),
        }
    }

    /// Arguments passed to `ssh`, the remote script last.
    pub fn args(&self, script: &str) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", self.connect_timeout),
        ];
        if let Some(port) = self.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        args.push(self.destination());
        args.push("--".to_string());
        args.push(script.to_string());
        args
    }
}

impl CommandRunner for SshRunner {
    fn describe(&self) -> String {
        match self.port {
            Some(port) => format!("ssh://{}:{port}", self.destination()),
            None => format!("ssh://{}", self.destination()),
        }
    }

    fn run(&self, script: &str) -> Result<CommandOutput, ProviderError> {
        let output = Command::new("ssh")
            .args(self.args(script))
            .output()
            .map_err(|e| ProviderError::unavailable(self.describe(), format!("spawn ssh: {e}")))?;
        let out = CommandOutput::from_output("ssh", script, output)?;
        if out.status == SSH_TRANSPORT_FAILURE {
            return Err(ProviderError::unavailable(
                self.describe(),
                out.stderr_line().to_string(),
            ));
        }
        Ok(out)
    }
}

/// Runs scripts inside a running container via `docker exec`.
#[derive(Clone, Debug)]
pub struct DockerRunner {
    container: String,
}

/// stderr prefixes that come from the docker CLI or daemon, not from the script.
const DOCKER_FAILURES: &[&str] = &[
    "Error response from daemon",
    "Error: No such container",
    "Cannot connect to the Docker daemon",
];

impl DockerRunner {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
        }
    }

    pub fn args(&self, script: &str) -> Vec<String> {
        vec![
            "exec".to_string(),
            self.container.clone(),
            "sh".to_string(),
            "-c".to_string(),
            script.to_string(),
        ]
    }
}

pub(crate) fn is_docker_failure(stderr: &str) -> bool {
    stderr
        .lines()
        .any(|line| DOCKER_FAILURES.iter().any(|p| line.starts_with(p)))
}

impl CommandRunner for DockerRunner {
    fn describe(&self) -> String {
        format!("docker://{}", self.container)
    }

    fn run(&self, script: &str) -> Result<CommandOutput, ProviderError> {
        let output = Command::new("docker")
            .args(self.args(script))
            .output()
            .map_err(|e| {
                ProviderError::unavailable(self.describe(), format!("spawn docker: {e}"))
            })?;
        let out = CommandOutput::from_output("docker", script, output)?;
        if out.status != 0 && is_docker_failure(&out.stderr) {
            return Err(ProviderError::unavailable(
                self.describe(),
                out.stderr_line().to_string(),
            ));
        }
        Ok(out)
    }
}
