use super::{CheckResult, Mismatches};
use crate::model::{ExistsFact, OwnershipFact, SymlinkFact};
use crate::provider::{HostInspector, ProviderError};
use hostcheck_types::ids;

pub fn gather_file<H: HostInspector + ?Sized>(
    host: &H,
    path: &str,
) -> Result<ExistsFact, ProviderError> {
    Ok(ExistsFact {
        exists: host.file_exists(path)?,
    })
}

pub fn compare_file(fact: &ExistsFact) -> CheckResult {
    let mut m = Mismatches::default();
    m.expect(ids::CODE_PATH_MISSING, "exists", true, fact.exists);
    m.finish()
}

pub fn gather_symlink<H: HostInspector + ?Sized>(
    host: &H,
    path: &str,
) -> Result<SymlinkFact, ProviderError> {
    let exists = host.file_exists(path)?;
    let is_symlink = if exists {
        Some(host.is_symlink(path)?)
    } else {
        None
    };
    let target = if is_symlink == Some(true) {
        Some(host.link_target(path)?)
    } else {
        None
    };

    Ok(SymlinkFact {
        exists,
        is_symlink,
        target,
    })
}

/// Exact string comparison: no trailing-slash or relative-path normalization.
pub fn compare_symlink(expected_target: &str, fact: &SymlinkFact) -> CheckResult {
    let mut m = Mismatches::default();
    m.expect(ids::CODE_PATH_MISSING, "exists", true, fact.exists);
    if let Some(is_symlink) = fact.is_symlink {
        m.expect(ids::CODE_NOT_A_SYMLINK, "is_symlink", true, is_symlink);
    }
    if let Some(actual) = fact.target.as_deref() {
        m.expect(
            ids::CODE_LINK_TARGET_MISMATCH,
            "link_target",
            expected_target,
            actual,
        );
    }
    m.finish()
}

pub fn gather_ownership<H: HostInspector + ?Sized>(
    host: &H,
    path: &str,
) -> Result<OwnershipFact, ProviderError> {
    if !host.file_exists(path)? {
        return Ok(OwnershipFact {
            exists: false,
            owner: None,
            group: None,
        });
    }

    Ok(OwnershipFact {
        exists: true,
        owner: Some(host.owner(path)?),
        group: Some(host.owner_group(path)?),
    })
}

pub fn compare_ownership(expected_user: &str, expected_group: &str, fact: &OwnershipFact) -> CheckResult {
    let mut m = Mismatches::default();
    m.expect(ids::CODE_PATH_MISSING, "exists", true, fact.exists);
    if let Some(owner) = fact.owner.as_deref() {
        m.expect(ids::CODE_OWNER_MISMATCH, "owner", expected_user, owner);
    }
    if let Some(group) = fact.group.as_deref() {
        m.expect(ids::CODE_GROUP_MISMATCH, "group", expected_group, group);
    }
    m.finish()
}

pub fn check_file<H: HostInspector + ?Sized>(
    host: &H,
    path: &str,
) -> Result<CheckResult, ProviderError> {
    Ok(compare_file(&gather_file(host, path)?))
}

/// Passes iff `path` exists, is a symlink, and its target equals `expected_target`.
pub fn check_symlink<H: HostInspector + ?Sized>(
    host: &H,
    path: &str,
    expected_target: &str,
) -> Result<CheckResult, ProviderError> {
    Ok(compare_symlink(expected_target, &gather_symlink(host, path)?))
}

/// Passes iff `path` exists and is owned by `expected_user`:`expected_group`.
pub fn check_path_ownership<H: HostInspector + ?Sized>(
    host: &H,
    path: &str,
    expected_user: &str,
    expected_group: &str,
) -> Result<CheckResult, ProviderError> {
    let fact = gather_ownership(host, path)?;
    Ok(compare_ownership(expected_user, expected_group, &fact))
}
