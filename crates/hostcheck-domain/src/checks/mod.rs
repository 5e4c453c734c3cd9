//! One module per expectation kind.
//!
//! Every kind is split in two: `gather` asks the provider for a fresh
//! [`HostFact`], and `compare` is a pure function from expectation + fact to
//! [`CheckResult`].

use crate::model::{ExpectationRecord, HostFact};
use crate::provider::{HostInspector, ProviderError};
use hostcheck_types::Mismatch;
use std::fmt::Display;

mod account;
mod command;
mod package;
mod path;
mod service;


pub use account::{check_group, check_user, check_user_group};
pub use command::check_command;
pub use package::check_package;
pub use path::{check_file, check_path_ownership, check_symlink};
pub use service::check_service_state;

/// Outcome of comparing one expectation against the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckResult {
    Pass,
    Fail {
        /// Code of the first mismatch, in the order the kind checks its fields.
        code: &'static str,
        mismatches: Vec<Mismatch>,
    },
}

impl CheckResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckResult::Pass)
    }

    pub fn code(&self) -> Option<&'static str> {
        match self {
            CheckResult::Pass => None,
            CheckResult::Fail { code, .. } => Some(*code),
        }
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        match self {
            CheckResult::Pass => &[],
            CheckResult::Fail { mismatches, .. } => mismatches,
        }
    }

    pub fn has_mismatch(&self, field: &str) -> bool {
        self.mismatches().iter().any(|m| m.field == field)
    }
}

/// Query the host for `record` and compare.
pub fn check<H>(host: &H, record: &ExpectationRecord) -> Result<(HostFact, CheckResult), ProviderError>
where
    H: HostInspector + ?Sized,
{
    match record {
        ExpectationRecord::PackageInstalled { name } => {
            let fact = package::gather(host, name)?;
            Ok((HostFact::Package(fact), package::compare(&fact)))
        }
        ExpectationRecord::GroupExists { name } => {
            let fact = account::gather_group(host, name)?;
            Ok((HostFact::Group(fact), account::compare_group(&fact)))
        }
        ExpectationRecord::UserExists { name, group: None } => {
            let fact = account::gather_user(host, name)?;
            Ok((HostFact::User(fact), account::compare_user(&fact)))
        }
        ExpectationRecord::UserExists {
            name,
            group: Some(group),
        } => {
            let fact = account::gather_user_group(host, name, group)?;
            let result = account::compare_user_group(group, &fact);
            Ok((HostFact::UserGroup(fact), result))
        }
        ExpectationRecord::FileExists { path } => {
            let fact = path::gather_file(host, path)?;
            Ok((HostFact::File(fact), path::compare_file(&fact)))
        }
        ExpectationRecord::SymlinkTarget { path, target } => {
            let fact = path::gather_symlink(host, path)?;
            let result = path::compare_symlink(target, &fact);
            Ok((HostFact::Symlink(fact), result))
        }
        ExpectationRecord::PathOwnership { path, user, group } => {
            let fact = path::gather_ownership(host, path)?;
            let result = path::compare_ownership(user, group, &fact);
            Ok((HostFact::Ownership(fact), result))
        }
        ExpectationRecord::ServiceState {
            name,
            running,
            enabled,
        } => {
            let fact = service::gather(host, name)?;
            let result = service::compare(*running, *enabled, &fact);
            Ok((HostFact::Service(fact), result))
        }
        ExpectationRecord::CommandStatus {
            command,
            exit_status,
        } => {
            let fact = command::gather(host, command)?;
            let result = command::compare(*exit_status, &fact);
            Ok((HostFact::Command(fact), result))
        }
    }
}

/// Collects field mismatches; the first one pushed decides the result code.
#[derive(Default)]
struct Mismatches {
    code: Option<&'static str>,
    items: Vec<Mismatch>,
}

impl Mismatches {
    fn expect<T>(&mut self, code: &'static str, field: &str, expected: T, actual: T)
    where
        T: PartialEq + Display,
    {
        if expected != actual {
            self.code.get_or_insert(code);
            self.items.push(Mismatch {
                field: field.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }

    fn finish(self) -> CheckResult {
        match self.code {
            None => CheckResult::Pass,
            Some(code) => CheckResult::Fail {
                code,
                mismatches: self.items,
            },
        }
    }
}
