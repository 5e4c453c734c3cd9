use super::{CheckResult, Mismatches};
use crate::model::PackageFact;
use crate::provider::{HostInspector, ProviderError};
use hostcheck_types::ids;

pub fn gather<H: HostInspector + ?Sized>(host: &H, name: &str) -> Result<PackageFact, ProviderError> {
    Ok(PackageFact {
        installed: host.package_installed(name)?,
    })
}

pub fn compare(fact: &PackageFact) -> CheckResult {
    let mut m = Mismatches::default();
    m.expect(ids::CODE_PACKAGE_MISSING, "installed", true, fact.installed);
    m.finish()
}

/// Passes iff the package is installed.
pub fn check_package<H: HostInspector + ?Sized>(
    host: &H,
    name: &str,
) -> Result<CheckResult, ProviderError> {
    Ok(compare(&gather(host, name)?))
}
