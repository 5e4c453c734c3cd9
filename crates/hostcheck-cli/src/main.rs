//! CLI entry point for hostcheck.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `hostcheck-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use hostcheck_app::{
    CheckInput, ExplainOutput, SuiteInput, format_roles, load_suite, parse_report_json,
    render_annotations, render_markdown, render_text, report_exit_code, run_check, run_explain,
    runtime_error_report, serialize_report, to_renderable,
};
use hostcheck_host::HostOptions;
use hostcheck_settings::Overrides;
use hostcheck_types::HostcheckReport;
use tracing::info;
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "hostcheck",
    version,
    about = "Declarative post-provisioning host state checks"
)]
struct Cli {
    /// Path to the suite TOML. A missing file falls back to the built-in roles.
    #[arg(long, global = true, default_value = "hostcheck.toml")]
    config: Utf8PathBuf,

    /// Only evaluate these roles (repeatable). Defaults to `roles_enabled`, then all roles.
    #[arg(long = "role", global = true)]
    roles: Vec<String>,

    /// Log level for hostcheck's own events (error|warn|info|debug|trace). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the suite on one or more hosts and write artifacts.
    Check {
        /// Host to check: local, ssh://[user@]host[:port], docker://container, snapshot://file.toml.
        #[arg(long = "target", required = true)]
        targets: Vec<String>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/hostcheck/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/hostcheck/comment.md")]
        markdown_out: Utf8PathBuf,

        /// Seconds ssh waits for a connection before the host counts as unavailable.
        #[arg(long, default_value = "10")]
        ssh_connect_timeout: u32,

        /// Do not print the terminal summary.
        #[arg(long, short)]
        quiet: bool,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/hostcheck/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/hostcheck/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit (default 10, per GHA best practices).
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "host.symlink_target") or code (e.g., "link_target_mismatch").
        identifier: String,
    },

    /// List the roles in the resolved suite; selected roles are marked with `*`.
    Roles,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.cmd {
        Commands::Check {
            ref targets,
            ref report_out,
            write_markdown,
            ref markdown_out,
            ssh_connect_timeout,
            quiet,
        } => cmd_check(
            &cli,
            targets.clone(),
            report_out,
            write_markdown.then_some(markdown_out.as_path()),
            HostOptions {
                ssh_connect_timeout,
            },
            quiet,
        ),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { identifier } => cmd_explain(&identifier),
        Commands::Roles => cmd_roles(&cli),
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(format!("hostcheck={level}")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| "hostcheck=info".into()),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read the suite file if present. The returned text is `None` when the built-in roles apply.
fn read_suite(path: &Utf8Path) -> anyhow::Result<Option<String>> {
    if !path.exists() {
        info!(path = %path, "no suite file, using built-in roles");
        return Ok(None);
    }
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read suite: {}", path))?;
    Ok(Some(text))
}

fn suite_input<'a>(cli: &'a Cli, text: Option<&'a str>) -> SuiteInput<'a> {
    let overrides = Overrides {
        roles: cli.roles.clone(),
    };
    match text {
        Some(text) => SuiteInput {
            text: Some(text),
            source: cli.config.as_str(),
            overrides,
        },
        None => SuiteInput::builtin(overrides),
    }
}

fn cmd_check(
    cli: &Cli,
    targets: Vec<String>,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
    host_options: HostOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let suite_text = read_suite(&cli.config)?;

        let output = run_check(CheckInput {
            suite: suite_input(cli, suite_text.as_deref()),
            targets,
            host_options,
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;

        let renderable = to_renderable(&output.report);
        if let Some(markdown_out) = markdown_out {
            let md = render_markdown(&renderable);
            write_text_file(markdown_out, &md).context("write markdown")?;
        }
        if !quiet {
            print!("{}", render_text(&renderable));
        }

        Ok(report_exit_code(&output.report))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("hostcheck error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &HostcheckReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;

    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", hostcheck_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                hostcheck_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}

fn cmd_roles(cli: &Cli) -> anyhow::Result<()> {
    let suite_text = read_suite(&cli.config)?;
    let suite = load_suite(suite_input(cli, suite_text.as_deref()))?;
    print!("{}", format_roles(&suite));
    Ok(())
}
