//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use spokecheck_test_util::normalize_nondeterministic;
use std::fs;
use std::path::{Path, PathBuf};

/// Spoke id every fixture's `outputs.json` was captured for.
const FIXTURE_SPOKE: &str = "/subscriptions/4a5b6c7d-8e9f-4a0b-9c1d-2e3f4a5b6c7d/resourceGroups/rg-spoke/providers/Microsoft.Network/virtualNetworks/vnet-spoke";

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(spokecheck_types::SpokecheckReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(spokecheck_settings::SpokecheckConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "spokecheck.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "spokecheck.config.v1.json",
            generate: generate_config_schema,
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
    let dir = schemas_dir()?;
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
    let dir = schemas_dir()?;
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

    for name in &missing {
        eprintln!("Missing schema: {}", name);
    }
    for name in &mismatched {
        eprintln!("Schema out of date: {}", name);
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Run the built binary over every fixture and compare against its golden report.
///
/// Checks, per fixture:
/// 1. The produced report validates against the generated report schema
/// 2. The exit code matches the golden verdict (0 pass/warn, 2 fail)
/// 3. The report equals `expected.report.json` once volatile fields are normalized
///
/// Fixtures without a golden report must exit 1 and write nothing.
fn validate_fixtures() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema())?;
    let compiled = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {}", e))?;

    let root = project_root()?;
    let bin = root.join("target").join("debug").join("spokecheck");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");
    if !bin.exists() {
        bail!(
            "spokecheck binary not found at {}.\nRun `cargo build -p spokecheck-cli` first.",
            bin.display()
        );
    }

    let mut errors = Vec::new();
    let mut checked = 0;

    let mut dirs: Vec<PathBuf> = fs::read_dir(fixtures_dir()?)
        .context("Failed to read tests/fixtures/")?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.join("outputs.json").exists())
        .collect();
    dirs.sort();

    for fixture_dir in dirs {
        let name = fixture_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = temp_dir.path().join("report.json");

        let output = std::process::Command::new(&bin)
            .arg("--config")
            .arg(fixture_dir.join("spokecheck.toml"))
            .args(["check", "--spoke", FIXTURE_SPOKE, "--outputs"])
            .arg(fixture_dir.join("outputs.json"))
            .arg("--report-out")
            .arg(&report_out)
            .env_remove("HUB_VNET_ID")
            .env_remove("DEFAULT_DNS")
            .output()
            .with_context(|| format!("Failed to run spokecheck on fixture '{}'", name))?;
        let code = output.status.code();
        checked += 1;

        let golden_path = fixture_dir.join("expected.report.json");
        if !golden_path.exists() {
            if code != Some(1) || report_out.exists() {
                errors.push(format!(
                    "fixture '{}': expected exit 1 and no report, got {:?}",
                    name, code
                ));
            } else {
                println!("  ✓ fixture '{}' is rejected", name);
            }
            continue;
        }

        if !report_out.exists() {
            errors.push(format!(
                "fixture '{}': no report written: {}",
                name,
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let report = read_json(&report_out)?;
        for err in compiled.iter_errors(&report) {
            errors.push(format!("fixture '{}': schema validation: {}", name, err));
        }

        let golden = read_json(&golden_path)?;
        let expected_code = if golden["verdict"] == "fail" { 2 } else { 0 };
        if code != Some(expected_code) {
            errors.push(format!(
                "fixture '{}': exit code {:?}, expected {}",
                name, code, expected_code
            ));
        }

        if normalize_nondeterministic(report) != normalize_nondeterministic(golden) {
            errors.push(format!(
                "fixture '{}': output differs from expected.report.json",
                name
            ));
        } else {
            println!("  ✓ fixture '{}' matches its golden report", name);
        }
    }

    if checked == 0 {
        bail!("No fixtures found");
    }
    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} fixtures pass conformance checks!", checked);
    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Validate that all rule ids have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let rule_ids = spokecheck_types::explain::all_rule_ids();
    let mut errors = Vec::new();

    for rule_id in rule_ids {
        match spokecheck_types::explain::lookup_explanation(rule_id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("Rule ID '{}' has empty title", rule_id));
                }
                if exp.description.is_empty() {
                    errors.push(format!("Rule ID '{}' has empty description", rule_id));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("Rule ID '{}' has empty remediation", rule_id));
                }
            }
            None => errors.push(format!("Rule ID '{}' has no explanation", rule_id)),
        }
    }

    if errors.is_empty() {
        println!("✓ {} rule IDs have explanations", rule_ids.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  validate-fixtures Run the built binary over tests/fixtures and compare reports");
    eprintln!("  explain-coverage  Validate all rule IDs have explanations");
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
        "validate-fixtures" => validate_fixtures(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
