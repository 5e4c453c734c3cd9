use crate::{RenderableCheck, RenderableCheckStatus, RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Hostcheck report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    let d = &report.data;
    out.push_str(&format!(
        "- Verdict: **{}**\n- Suite: `{}` (roles: {})\n- Checks: {} passed, {} failed, {} skipped\n",
        verdict,
        d.suite,
        d.roles.join(", "),
        d.passed,
        d.failed,
        d.skipped
    ));
    if d.errored_hosts > 0 {
        out.push_str(&format!("- Hosts with errors: {}\n", d.errored_hosts));
    }
    out.push('\n');

    if report.hosts.is_empty() {
        out.push_str("No hosts checked.\n");
        return out;
    }

    for host in &report.hosts {
        out.push_str(&format!(
            "## `{}`: {}\n\n",
            host.target,
            host.status.label()
        ));

        if let Some(error) = &host.error {
            out.push_str(&format!("> Error: {}\n\n", error));
        }

        if host.checks.is_empty() {
            out.push_str("No checks completed.\n\n");
            continue;
        }

        out.push_str("| Status | Role | Check | Subject | Detail |\n");
        out.push_str("|---|---|---|---|---|\n");
        for c in &host.checks {
            out.push_str(&format!(
                "| {} | {} | `{}` | `{}` | {} |\n",
                c.status.label(),
                cell(&c.role),
                c.check_id,
                cell(&c.subject),
                cell(&detail(c))
            ));
        }
        out.push('\n');
    }

    out
}

fn detail(c: &RenderableCheck) -> String {
    match c.status {
        RenderableCheckStatus::Pass => String::new(),
        RenderableCheckStatus::Skip => format!(
            "disabled: {}",
            c.disabled_reason.as_deref().unwrap_or("no reason given")
        ),
        RenderableCheckStatus::Fail if c.mismatches.is_empty() => c.message.clone(),
        RenderableCheckStatus::Fail => c
            .mismatches
            .iter()
            .map(|m| format!("{}: expected `{}`, found `{}`", m.field, m.expected, m.actual))
            .collect::<Vec<_>>()
            .join("<br>"),
    }
}

/// Keep table cells on one line and free of column separators.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
