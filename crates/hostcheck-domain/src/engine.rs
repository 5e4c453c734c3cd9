use crate::checks::{self, CheckResult};
use crate::fingerprint::fingerprint_for_check;
use crate::model::Expectation;
use crate::provider::{HostInspector, ProviderError};
use crate::report::{SessionReport, StatusCounts};
use hostcheck_types::{CheckRecord, CheckStatus};
use thiserror::Error;

/// A provider failure ended the session early.
///
/// Carries the records completed before the failure so callers can still report them.
#[derive(Clone, Debug, Error)]
#[error("host session aborted after {} checks: {source}", completed.len())]
pub struct SessionAborted {
    pub completed: Vec<CheckRecord>,
    #[source]
    pub source: ProviderError,
}

/// Evaluate `expectations` against one host, sequentially and in order.
///
/// Assertion failures are recorded and evaluation continues; the first
/// provider error aborts the remaining checks.
pub fn evaluate<H>(expectations: &[Expectation], host: &H) -> Result<SessionReport, SessionAborted>
where
    H: HostInspector + ?Sized,
{
    let mut results = Vec::with_capacity(expectations.len());

    for expectation in expectations {
        let record = match &expectation.disabled {
            Some(reason) => skipped_record(expectation, reason),
            None => match checks::check(host, &expectation.record) {
                Ok((_, outcome)) => checked_record(expectation, outcome),
                Err(source) => {
                    return Err(SessionAborted {
                        completed: results,
                        source,
                    });
                }
            },
        };
        results.push(record);
    }

    let counts = StatusCounts::from_records(&results);
    Ok(SessionReport { results, counts })
}

fn base_record(expectation: &Expectation, status: CheckStatus, message: String) -> CheckRecord {
    let check_id = expectation.record.check_id();
    let subject = expectation.record.subject();
    CheckRecord {
        role: expectation.role.clone(),
        check_id: check_id.to_string(),
        code: None,
        subject: subject.to_string(),
        status,
        message,
        mismatches: Vec::new(),
        fingerprint: Some(fingerprint_for_check(check_id, subject, &expectation.role)),
        disabled_reason: None,
    }
}

fn skipped_record(expectation: &Expectation, reason: &str) -> CheckRecord {
    let message = format!("{}: disabled ({reason})", expectation.record.describe());
    let mut record = base_record(expectation, CheckStatus::Skip, message);
    record.disabled_reason = Some(reason.to_string());
    record
}

fn checked_record(expectation: &Expectation, outcome: CheckResult) -> CheckRecord {
    let label = expectation.record.describe();
    match outcome {
        CheckResult::Pass => base_record(expectation, CheckStatus::Pass, format!("{label}: ok")),
        CheckResult::Fail { code, mismatches } => {
            let details = mismatches
                .iter()
                .map(|m| format!("{} expected `{}`, found `{}`", m.field, m.expected, m.actual))
                .collect::<Vec<_>>()
                .join("; ");
            let mut record =
                base_record(expectation, CheckStatus::Fail, format!("{label}: {details}"));
            record.code = Some(code.to_string());
            record.mismatches = mismatches;
            record
        }
    }
}
