use super::{CheckResult, Mismatches};
use crate::model::CommandFact;
use crate::provider::{HostInspector, ProviderError};
use hostcheck_types::ids;

pub fn gather<H: HostInspector + ?Sized>(
    host: &H,
    command: &str,
) -> Result<CommandFact, ProviderError> {
    Ok(CommandFact {
        exit_status: host.command_status(command)?,
    })
}

pub fn compare(expected_status: i32, fact: &CommandFact) -> CheckResult {
    let mut m = Mismatches::default();
    m.expect(
        ids::CODE_EXIT_STATUS_MISMATCH,
        "exit_status",
        expected_status,
        fact.exit_status,
    );
    m.finish()
}

pub fn check_command<H: HostInspector + ?Sized>(
    host: &H,
    command: &str,
    expected_status: i32,
) -> Result<CheckResult, ProviderError> {
    Ok(compare(expected_status, &gather(host, command)?))
}
