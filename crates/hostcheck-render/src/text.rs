use crate::{RenderableCheckStatus, RenderableReport, RenderableVerdictStatus};

/// Plain terminal summary: one line per check, mismatches indented below failures.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();

    for host in &report.hosts {
        out.push_str(&format!("{} [{}]\n", host.target, host.status.label()));
        for c in &host.checks {
            out.push_str(&format!(
                "  {:<4}  {:<10} {}\n",
                c.status.label(),
                c.role,
                c.message
            ));
            if c.status == RenderableCheckStatus::Fail {
                for m in &c.mismatches {
                    out.push_str(&format!(
                        "        {}: expected {}, found {}\n",
                        m.field, m.expected, m.actual
                    ));
                }
            }
        }
        if let Some(error) = &host.error {
            out.push_str(&format!("  ERROR {}\n", error));
        }
    }

    let d = &report.data;
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "\nhostcheck: {} ({} passed, {} failed, {} skipped",
        verdict, d.passed, d.failed, d.skipped
    ));
    if d.errored_hosts > 0 {
        out.push_str(&format!(", {} host errors", d.errored_hosts));
    }
    out.push_str(")\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::mixed_report;

    #[test]
    fn lists_every_record_and_the_totals() {
        let text = render_text(&mixed_report());
        assert!(text.contains("docker://solr_instance [FAIL]\n"));
        assert!(text.contains("  PASS  solr       package 'lsof': ok\n"));
        assert!(text.contains("  FAIL  solr       symlink '/opt/solr'"));
        assert!(text.contains("        link_target: expected /opt/solr-6.2.0, found /opt/solr-6.3.0\n"));
        assert!(text.contains("  SKIP  zookeeper  service 'zookeeper': disabled"));
        assert!(text.contains("ssh://zk-1 [ERROR]\n  ERROR host ssh://zk-1 is unavailable"));
        assert!(text.ends_with(
            "hostcheck: FAIL (1 passed, 1 failed, 1 skipped, 1 host errors)\n"
        ));
    }
}
