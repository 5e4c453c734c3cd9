use super::{CheckResult, Mismatches};
use crate::model::{ExistsFact, UserGroupFact};
use crate::provider::{HostInspector, ProviderError};
use hostcheck_types::ids;

pub fn gather_group<H: HostInspector + ?Sized>(
    host: &H,
    name: &str,
) -> Result<ExistsFact, ProviderError> {
    Ok(ExistsFact {
        exists: host.group_exists(name)?,
    })
}

pub fn compare_group(fact: &ExistsFact) -> CheckResult {
    let mut m = Mismatches::default();
    m.expect(ids::CODE_GROUP_MISSING, "group_exists", true, fact.exists);
    m.finish()
}

pub fn gather_user<H: HostInspector + ?Sized>(
    host: &H,
    name: &str,
) -> Result<ExistsFact, ProviderError> {
    Ok(ExistsFact {
        exists: host.user_exists(name)?,
    })
}

pub fn compare_user(fact: &ExistsFact) -> CheckResult {
    let mut m = Mismatches::default();
    m.expect(ids::CODE_USER_MISSING, "user_exists", true, fact.exists);
    m.finish()
}

pub fn gather_user_group<H: HostInspector + ?Sized>(
    host: &H,
    user: &str,
    group: &str,
) -> Result<UserGroupFact, ProviderError> {
    let group_exists = host.group_exists(group)?;
    let user_exists = host.user_exists(user)?;
    let primary_group = if user_exists {
        Some(host.primary_group(user)?)
    } else {
        None
    };

    Ok(UserGroupFact {
        group_exists,
        user_exists,
        primary_group,
    })
}

/// Group existence and user existence are reported independently of each other.
pub fn compare_user_group(expected_group: &str, fact: &UserGroupFact) -> CheckResult {
    let mut m = Mismatches::default();
    m.expect(ids::CODE_GROUP_MISSING, "group_exists", true, fact.group_exists);
    m.expect(ids::CODE_USER_MISSING, "user_exists", true, fact.user_exists);
    if let Some(actual) = fact.primary_group.as_deref() {
        m.expect(
            ids::CODE_PRIMARY_GROUP_MISMATCH,
            "primary_group",
            expected_group,
            actual,
        );
    }
    m.finish()
}

pub fn check_group<H: HostInspector + ?Sized>(
    host: &H,
    name: &str,
) -> Result<CheckResult, ProviderError> {
    Ok(compare_group(&gather_group(host, name)?))
}

pub fn check_user<H: HostInspector + ?Sized>(
    host: &H,
    name: &str,
) -> Result<CheckResult, ProviderError> {
    Ok(compare_user(&gather_user(host, name)?))
}

/// Passes iff `expected_group` exists, `user` exists, and the user's primary
/// group is exactly `expected_group`.
pub fn check_user_group<H: HostInspector + ?Sized>(
    host: &H,
    user: &str,
    expected_group: &str,
) -> Result<CheckResult, ProviderError> {
    let fact = gather_user_group(host, user, expected_group)?;
    Ok(compare_user_group(expected_group, &fact))
}
