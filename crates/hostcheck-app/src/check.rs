//! The `check` use case: evaluate the resolved suite on every target and produce a report.

use anyhow::Context;
use hostcheck_domain::{Expectation, SessionAborted};
use hostcheck_host::{HostOptions, Target};
use hostcheck_settings::ResolvedSuite;
use hostcheck_types::{
    CheckStatus, HostReport, HostStatus, HostcheckData, HostcheckReport, RunMeta,
    SCHEMA_REPORT_V1, ToolMeta, Verdict, VerdictCounts, VerdictStatus, ids,
};
use rayon::prelude::*;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::suite::{SuiteInput, load_suite};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    pub suite: SuiteInput<'a>,
    /// Target URIs, as given by the user. Report hosts keep this order.
    pub targets: Vec<String>,
    pub host_options: HostOptions,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: HostcheckReport,
    /// The resolved suite used.
    pub suite: ResolvedSuite,
}

/// Run the check use case: load the suite, evaluate every target, produce the report.
///
/// Suite and target errors are returned before any host is contacted. Provider failures
/// do not fail the use case; they mark the affected host as `error` in the report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let suite = load_suite(input.suite)?;

    anyhow::ensure!(!input.targets.is_empty(), "no targets given");
    let targets = input
        .targets
        .iter()
        .map(|raw| {
            raw.parse::<Target>()
                .with_context(|| format!("parse target {raw}"))
                .map(|t| (raw.as_str(), t))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    info!(
        suite = %suite.source,
        roles = %suite.roles.join(","),
        expectations = suite.expectations.len(),
        hosts = targets.len(),
        "starting check"
    );

    let hosts: Vec<HostReport> = targets
        .par_iter()
        .map(|(raw, target)| check_host(raw, target, &suite.expectations, &input.host_options))
        .collect();

    let ended_at = OffsetDateTime::now_utc();
    let duration_ms = (ended_at - started_at).whole_milliseconds().max(0) as u64;

    let verdict = verdict_for(&hosts);
    let data = HostcheckData {
        suite: suite.source.clone(),
        roles: suite.roles.clone(),
        hosts_total: hosts.len() as u32,
        checks_total: hosts.iter().map(|h| h.results.len() as u32).sum(),
    };

    let report = HostcheckReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "hostcheck".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            ended_at,
            duration_ms,
        },
        verdict,
        hosts,
        data,
    };

    Ok(CheckOutput { report, suite })
}

/// One host session: open the provider, evaluate sequentially, never fail the run.
fn check_host(
    raw: &str,
    target: &Target,
    expectations: &[Expectation],
    options: &HostOptions,
) -> HostReport {
    let host = match hostcheck_host::open_target(target, options) {
        Ok(host) => host,
        Err(err) => {
            warn!(uri = raw, error = %err, "cannot open target");
            return HostReport {
                target: raw.to_string(),
                status: HostStatus::Error,
                error: Some(err.to_string()),
                results: Vec::new(),
            };
        }
    };

    info!(uri = raw, host = %host.describe(), "evaluating host");
    match hostcheck_domain::evaluate(expectations, host.as_ref()) {
        Ok(session) => {
            let status = if session.counts.all_passed() {
                HostStatus::Pass
            } else {
                HostStatus::Fail
            };
            info!(
                uri = raw,
                passed = session.counts.passed,
                failed = session.counts.failed,
                skipped = session.counts.skipped,
                "host finished"
            );
            HostReport {
                target: raw.to_string(),
                status,
                error: None,
                results: session.results,
            }
        }
        Err(SessionAborted { completed, source }) => {
            warn!(
                uri = raw,
                completed = completed.len(),
                error = %source,
                "host session aborted"
            );
            HostReport {
                target: raw.to_string(),
                status: HostStatus::Error,
                error: Some(source.to_string()),
                results: completed,
            }
        }
    }
}

fn verdict_for(hosts: &[HostReport]) -> Verdict {
    let mut counts = VerdictCounts::default();
    for h in hosts {
        counts.passed += h.count(CheckStatus::Pass);
        counts.failed += h.count(CheckStatus::Fail);
        counts.skipped += h.count(CheckStatus::Skip);
        if h.status == HostStatus::Error {
            counts.errored_hosts += 1;
        }
    }

    let mut reasons = Vec::new();
    if counts.failed > 0 {
        reasons.push(ids::REASON_CHECKS_FAILED.to_string());
    }
    if counts.errored_hosts > 0 {
        reasons.push(ids::REASON_HOST_ERROR.to_string());
    }

    let status = if reasons.is_empty() {
        VerdictStatus::Pass
    } else {
        VerdictStatus::Fail
    };
    Verdict {
        status,
        counts,
        reasons,
    }
}

/// Map a report to an exit code: 0 = pass, 2 = checks failed, 1 = a host or the tool errored.
pub fn report_exit_code(report: &HostcheckReport) -> i32 {
    let reasons = &report.verdict.reasons;
    let tool_trouble = [ids::REASON_HOST_ERROR, ids::REASON_TOOL_ERROR];
    if reasons.iter().any(|r| tool_trouble.contains(&r.as_str())) {
        return 1;
    }
    match report.verdict.status {
        VerdictStatus::Pass => 0,
        VerdictStatus::Fail => 2,
    }
}
