use crate::error::TargetError;
use std::fmt;
use std::str::FromStr;

/// Where the expectations are evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// This machine, through `sh -c`.
    Local,
    /// `ssh://[user@]host[:port]`
    Ssh {
        user: Option<String>,
        host: String,
        port: Option<u16>,
    },
    /// `docker://container`
    Docker { container: String },
    /// `snapshot://path/to/host.toml`
    Snapshot { path: String },
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input == "local" {
            return Ok(Target::Local);
        }
        let Some((scheme, rest)) = input.split_once("://") else {
            return Err(TargetError::invalid(
                input,
                "expected `local`, `ssh://`, `docker://` or `snapshot://`",
            ));
        };
        if rest.is_empty() {
            return Err(TargetError::invalid(input, "missing address after scheme"));
        }

        match scheme {
            "ssh" => parse_ssh(input, rest),
            "docker" => {
                if rest.contains('/') {
                    return Err(TargetError::invalid(input, "container name contains `/`"));
                }
                Ok(Target::Docker {
                    container: rest.to_string(),
                })
            }
            "snapshot" => Ok(Target::Snapshot {
                path: rest.to_string(),
            }),
            other => Err(TargetError::invalid(
                input,
                format!("unknown scheme `{other}`"),
            )),
        }
    }
}

fn parse_ssh(input: &str, rest: &str) -> Result<Target, TargetError> {
    let (user, hostport) = match rest.split_once('@') {
        Some((user, hostport)) if !user.is_empty() => (Some(user.to_string()), hostport),
        Some(_) => return Err(TargetError::invalid(input, "empty user before `@`")),
        None => (None, rest),
    };

    let (host, port) = match hostport.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| TargetError::invalid(input, format!("invalid port `{port}`")))?;
            (host, Some(port))
        }
        None => (hostport, None),
    };

    if host.is_empty() || host.contains('/') {
        return Err(TargetError::invalid(input, "invalid host"));
    }

    Ok(Target::Ssh {
        user,
        host: host.to_string(),
        port,
    })
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Local => f.write_str("local"),
            Target::Ssh { user, host, port } => {
                f.write_str("ssh://")?;
                if let Some(user) = user {
                    write!(f, "{user}@")?;
                }
                f.write_str(host)?;
                if let Some(port) = port {
                    write!(f, ":{port}")?;
                }
                Ok(())
            }
            Target::Docker { container } => write!(f, "docker://{container}"),
            Target::Snapshot { path } => write!(f, "snapshot://{path}"),
        }
    }
}
