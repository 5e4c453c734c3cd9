use anyhow::Context;
use hostcheck_render::{
    RenderableCheck, RenderableCheckStatus, RenderableData, RenderableHost, RenderableHostStatus,
    RenderableMismatch, RenderableReport, RenderableVerdictStatus,
};
use hostcheck_types::{
    CheckRecord, CheckStatus, HostReport, HostStatus, HostcheckData, HostcheckReport, RunMeta,
    SCHEMA_REPORT_V1, ToolMeta, Verdict, VerdictCounts, VerdictStatus, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<HostcheckReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse hostcheck report")
}

pub fn serialize_report(report: &HostcheckReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &HostcheckReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict.status {
            VerdictStatus::Pass => RenderableVerdictStatus::Pass,
            VerdictStatus::Fail => RenderableVerdictStatus::Fail,
        },
        hosts: report.hosts.iter().map(renderable_host).collect(),
        data: RenderableData {
            suite: report.data.suite.clone(),
            roles: report.data.roles.clone(),
            passed: report.verdict.counts.passed,
            failed: report.verdict.counts.failed,
            skipped: report.verdict.counts.skipped,
            errored_hosts: report.verdict.counts.errored_hosts,
        },
    }
}

fn renderable_host(h: &HostReport) -> RenderableHost {
    RenderableHost {
        target: h.target.clone(),
        status: match h.status {
            HostStatus::Pass => RenderableHostStatus::Pass,
            HostStatus::Fail => RenderableHostStatus::Fail,
            HostStatus::Error => RenderableHostStatus::Error,
        },
        error: h.error.clone(),
        checks: h.results.iter().map(renderable_check).collect(),
    }
}

fn renderable_check(r: &CheckRecord) -> RenderableCheck {
    RenderableCheck {
        role: r.role.clone(),
        check_id: r.check_id.clone(),
        code: r.code.clone(),
        subject: r.subject.clone(),
        status: match r.status {
            CheckStatus::Pass => RenderableCheckStatus::Pass,
            CheckStatus::Fail => RenderableCheckStatus::Fail,
            CheckStatus::Skip => RenderableCheckStatus::Skip,
        },
        message: r.message.clone(),
        mismatches: r
            .mismatches
            .iter()
            .map(|m| RenderableMismatch {
                field: m.field.clone(),
                expected: m.expected.clone(),
                actual: m.actual.clone(),
            })
            .collect(),
        disabled_reason: r.disabled_reason.clone(),
    }
}

/// A schema-valid report for runs that aborted before any host produced results.
///
/// The error is carried as a single failed `tool.runtime` record on a pseudo host named `tool`.
pub fn runtime_error_report(message: &str) -> HostcheckReport {
    let now = OffsetDateTime::now_utc();
    HostcheckReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "hostcheck".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at: now,
            ended_at: now,
            duration_ms: 0,
        },
        verdict: Verdict {
            status: VerdictStatus::Fail,
            counts: VerdictCounts {
                failed: 1,
                ..VerdictCounts::default()
            },
            reasons: vec![ids::REASON_TOOL_ERROR.to_string()],
        },
        hosts: vec![HostReport {
            target: "tool".to_string(),
            status: HostStatus::Fail,
            error: None,
            results: vec![CheckRecord {
                role: "tool".to_string(),
                check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
                code: Some(ids::CODE_RUNTIME_ERROR.to_string()),
                subject: "hostcheck".to_string(),
                status: CheckStatus::Fail,
                message: message.to_string(),
                mismatches: Vec::new(),
                fingerprint: None,
                disabled_reason: None,
            }],
        }],
        data: HostcheckData {
            suite: "unknown".to_string(),
            hosts_total: 0,
            checks_total: 0,
            roles: Vec::new(),
        },
    }
}
