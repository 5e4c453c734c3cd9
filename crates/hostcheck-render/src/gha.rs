use crate::{RenderableCheckStatus, RenderableHostStatus, RenderableReport};

/// Render failed checks and errored hosts as GitHub Actions workflow command annotations.
///
/// Format:
/// `::error title={target}::[{check_id}:{code}] {message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for host in &report.hosts {
        let title = escape_property(&host.target);

        if host.status == RenderableHostStatus::Error {
            let error = host.error.as_deref().unwrap_or("host session failed");
            out.push(format!(
                "::error title={}::{}",
                title,
                escape_data(&format!("[tool.runtime:provider_unavailable] {error}"))
            ));
        }

        for c in &host.checks {
            if c.status != RenderableCheckStatus::Fail {
                continue;
            }
            let code = c.code.as_deref().unwrap_or("failed");
            let message = escape_data(&format!("[{}:{}] {}", c.check_id, code, c.message));
            out.push(format!("::error title={}::{}", title, message));
        }
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
