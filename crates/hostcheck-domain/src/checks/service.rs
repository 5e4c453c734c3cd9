use super::{CheckResult, Mismatches};
use crate::model::ServiceFact;
use crate::provider::{HostInspector, ProviderError};
use hostcheck_types::ids;

pub fn gather<H: HostInspector + ?Sized>(host: &H, name: &str) -> Result<ServiceFact, ProviderError> {
    Ok(ServiceFact {
        running: host.service_running(name)?,
        enabled: host.service_enabled(name)?,
    })
}

pub fn compare(expected_running: bool, expected_enabled: bool, fact: &ServiceFact) -> CheckResult {
    let mut m = Mismatches::default();
    m.expect(
        ids::CODE_SERVICE_RUNNING_MISMATCH,
        "running",
        expected_running,
        fact.running,
    );
    m.expect(
        ids::CODE_SERVICE_ENABLED_MISMATCH,
        "enabled",
        expected_enabled,
        fact.enabled,
    );
    m.finish()
}

/// Passes iff the service is both running and enabled.
pub fn check_service_state<H: HostInspector + ?Sized>(
    host: &H,
    name: &str,
) -> Result<CheckResult, ProviderError> {
    Ok(compare(true, true, &gather(host, name)?))
}
