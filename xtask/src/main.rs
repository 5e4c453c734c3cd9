//! Developer tasks (schema generation, report validation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use hostcheck_types::{explain, ids};
use schemars::schema_for;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .or_else(|_| std::env::current_dir())
        .unwrap_or_else(|_| PathBuf::from("."));

    // If we're in the xtask directory, go up one level
    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return parent.to_path_buf();
    }
    manifest_dir
}

/// Get the schemas directory path.
fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Get the CLI fixtures directory path.
fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(hostcheck_types::HostcheckReport)
}

fn generate_suite_schema() -> schemars::Schema {
    schema_for!(hostcheck_settings::SuiteConfigV1)
}

fn generate_snapshot_schema() -> schemars::Schema {
    schema_for!(hostcheck_host::SnapshotV1)
}

/// List of schemas to generate.
fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "hostcheck.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "hostcheck.suite.v1.json",
            generate: generate_suite_schema,
        },
        SchemaSpec {
            filename: "hostcheck.snapshot.v1.json",
            generate: generate_snapshot_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help                    Show this message");
    eprintln!("  emit-schemas            Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas        Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids        Print known schema IDs");
    eprintln!("  validate-report <FILE>  Validate a report.json against the report schema");
    eprintln!("  validate-fixtures       Validate golden fixture reports under tests/fixtures/");
    eprintln!("  explain-coverage        Validate all check IDs and codes have explanations");
}

/// Token pattern for codes and verdict reasons.
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn report_validator() -> anyhow::Result<jsonschema::Validator> {
    let schema = serde_json::to_value(generate_report_schema()).context("schema to json")?;
    jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {}", e))
}

/// Check one report value: schema, known identifiers, token hygiene, verdict consistency.
///
/// Problems are appended to `errors`, prefixed with `label`.
fn check_report(
    validator: &jsonschema::Validator,
    label: &str,
    value: &Value,
    errors: &mut Vec<String>,
) {
    for err in validator.iter_errors(value) {
        errors.push(format!("{}: schema validation: {}", label, err));
    }

    let reasons = value["verdict"]["reasons"].as_array().cloned().unwrap_or_default();
    for (i, reason) in reasons.iter().enumerate() {
        if let Some(s) = reason.as_str()
            && !is_valid_token(s)
        {
            errors.push(format!(
                "{}: verdict.reasons[{}] '{}' is not a valid token",
                label, i, s
            ));
        }
    }

    let mut failed = 0;
    let mut errored = 0;
    for (h, host) in value["hosts"].as_array().into_iter().flatten().enumerate() {
        if host["status"] == "error" {
            errored += 1;
        }
        for (i, record) in host["results"].as_array().into_iter().flatten().enumerate() {
            let at = format!("{}: hosts[{}].results[{}]", label, h, i);
            let check_id = record["check_id"].as_str().unwrap_or_default();
            let known_check = explain::all_check_ids().contains(&check_id)
                || check_id == ids::CHECK_TOOL_RUNTIME;
            if !known_check {
                errors.push(format!("{}: unknown check_id '{}'", at, check_id));
            }
            if let Some(code) = record["code"].as_str() {
                let known_code = explain::all_codes().contains(&code)
                    || code == ids::CODE_RUNTIME_ERROR;
                if !known_code || !is_valid_token(code) {
                    errors.push(format!("{}: unknown code '{}'", at, code));
                }
            }
            match record["status"].as_str() {
                Some("fail") => {
                    failed += 1;
                    if record["code"].is_null() {
                        errors.push(format!("{}: failed record has no code", at));
                    }
                }
                Some("skip") if record["disabled_reason"].is_null() => {
                    errors.push(format!("{}: skipped record has no disabled_reason", at));
                }
                _ => {}
            }
        }
    }

    let expected_status = if failed + errored == 0 { "pass" } else { "fail" };
    if value["verdict"]["status"] != expected_status {
        errors.push(format!(
            "{}: verdict.status should be '{}' ({} failed, {} errored hosts)",
            label, expected_status, failed, errored
        ));
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))
}

fn finish(errors: Vec<String>, what: &str) -> anyhow::Result<()> {
    if errors.is_empty() {
        println!("✓ {} passed", what);
        return Ok(());
    }
    eprintln!("{} errors:", what);
    for err in &errors {
        eprintln!("  - {}", err);
    }
    bail!("{} failed with {} errors", what, errors.len())
}

/// Validate a report file written by `hostcheck check`.
fn validate_report(path: Option<&str>) -> anyhow::Result<()> {
    let Some(path) = path else {
        bail!("validate-report needs a report path, e.g. artifacts/hostcheck/report.json");
    };
    let validator = report_validator()?;
    let value = read_json(Path::new(path))?;

    let mut errors = Vec::new();
    check_report(&validator, path, &value, &mut errors);
    finish(errors, "Report validation")
}

/// Validate every golden `expected.report.json` under tests/fixtures/.
///
/// Goldens carry placeholders for timestamps and the tool version; these are
/// swapped for real values before schema validation.
fn validate_fixtures() -> anyhow::Result<()> {
    let validator = report_validator()?;
    let dir = fixtures_dir();
    let mut errors = Vec::new();
    let mut count = 0;

    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.join("expected.report.json").exists())
        .collect();
    entries.sort();

    for fixture in entries {
        let name = fixture
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let value = read_json(&fixture.join("expected.report.json"))?;
        let normalized = hostcheck_test_util::normalize_nondeterministic(value);
        if normalized["run"]["started_at"] != "__TIMESTAMP__" {
            errors.push(format!("{}: timestamps are not normalized", name));
        }
        check_report(&validator, &name, &with_concrete_timestamps(normalized), &mut errors);
        println!("  checked fixture '{}'", name);
        count += 1;
    }

    if count == 0 {
        bail!("No golden reports found in {}", dir.display());
    }
    finish(errors, "Fixture validation")
}

fn with_concrete_timestamps(mut value: Value) -> Value {
    if let Some(run) = value.get_mut("run").and_then(Value::as_object_mut) {
        for key in ["started_at", "ended_at"] {
            run.insert(key.to_string(), Value::from("2026-01-01T00:00:00Z"));
        }
    }
    value
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = explain::all_check_ids();
    let codes = explain::all_codes();
    let mut errors = Vec::new();

    for (kind, id) in check_ids
        .iter()
        .map(|id| ("Check ID", id))
        .chain(codes.iter().map(|code| ("Code", code)))
    {
        match explain::lookup_explanation(id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("{} '{}' has empty title", kind, id));
                }
                if exp.description.is_empty() {
                    errors.push(format!("{} '{}' has empty description", kind, id));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("{} '{}' has empty remediation", kind, id));
                }
                if exp.examples.probe.is_empty() {
                    errors.push(format!("{} '{}' has no probe example", kind, id));
                }
            }
            None => errors.push(format!("{} '{}' has no explanation", kind, id)),
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
    }
    finish(errors, "Explain coverage")
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "validate-report" => validate_report(args.get(2).map(String::as_str)),
        "validate-fixtures" => validate_fixtures(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            println!("{}", hostcheck_types::SCHEMA_REPORT_V1);
            println!("{}", hostcheck_settings::SCHEMA_SUITE_V1);
            println!("{}", hostcheck_host::SCHEMA_SNAPSHOT_V1);
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
