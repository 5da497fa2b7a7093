//! Conformance tests for spokecheck.
//!
//! These tests validate:
//! 1. Every rule id has an explanation
//! 2. Every fixture report validates against the generated report schema
//! 3. Every fixture config validates against the generated config schema

use schemars::schema_for;
use serde_json::Value;
use spokecheck_types::{explain, ids, SpokecheckReport, SCHEMA_REPORT_V1};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("spokecheck-cli should have parent")
        .parent()
        .expect("crates should have parent")
        .join("tests")
        .join("fixtures")
}

/// Every fixture directory holding `file_name`, paired with the parsed file.
fn fixture_files(file_name: &str) -> Vec<(String, PathBuf)> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(fixtures_dir()).expect("Failed to read fixtures dir") {
        let dir = entry.expect("Failed to read entry").path();
        let path = dir.join(file_name);
        if dir.is_dir() && path.exists() {
            let name = dir.file_name().unwrap().to_string_lossy().to_string();
            found.push((name, path));
        }
    }
    found.sort();
    found
}

fn compile(schema: schemars::Schema) -> jsonschema::Validator {
    let value = serde_json::to_value(&schema).expect("serialize schema");
    jsonschema::validator_for(&value).expect("generated schema compiles")
}

// =============================================================================
// Explanation Coverage Tests
// =============================================================================

#[test]
fn all_rule_ids_have_explanations() {
    for rule_id in explain::all_rule_ids() {
        let exp = explain::lookup_explanation(rule_id)
            .unwrap_or_else(|| panic!("Rule ID '{}' has no explanation in registry", rule_id));

        assert!(!exp.title.is_empty(), "Rule ID '{}' has empty title", rule_id);
        assert!(
            !exp.description.is_empty(),
            "Rule ID '{}' has empty description",
            rule_id
        );
        assert!(
            !exp.remediation.is_empty(),
            "Rule ID '{}' has empty remediation",
            rule_id
        );
    }
}

#[test]
fn registry_matches_known_rules() {
    assert_eq!(explain::all_rule_ids(), ids::ALL_RULES);

    // Rule ids are kebab-case.
    for rule_id in ids::ALL_RULES {
        let valid = rule_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        assert!(valid, "Rule ID '{}' should be kebab-case", rule_id);
    }
}

// =============================================================================
// Fixture Report Validation
// =============================================================================

#[test]
fn all_fixture_reports_validate_against_schema() {
    let validator = compile(schema_for!(SpokecheckReport));
    let reports = fixture_files("expected.report.json");
    assert!(!reports.is_empty(), "No fixture reports found");

    for (name, path) in reports {
        let content = std::fs::read_to_string(&path).expect("read report");
        let report: Value = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Fixture {} has invalid JSON: {}", name, e));

        assert_eq!(report["schema"], SCHEMA_REPORT_V1, "fixture '{}'", name);

        let errors: Vec<String> = validator
            .iter_errors(&report)
            .map(|e| e.to_string())
            .collect();
        assert!(
            errors.is_empty(),
            "Fixture '{}' does not match the report schema:\n{}",
            name,
            errors.join("\n")
        );
    }
}

#[test]
fn fixture_report_counts_match_findings() {
    for (name, path) in fixture_files("expected.report.json") {
        let content = std::fs::read_to_string(&path).expect("read report");
        let report: Value = serde_json::from_str(&content).expect("parse report");

        let findings = report["findings"].as_array().expect("findings array");
        for severity in ["ok", "info", "warning", "critical"] {
            let counted = findings.iter().filter(|f| f["severity"] == severity).count();
            assert_eq!(
                report["counts"][severity].as_u64(),
                Some(counted as u64),
                "fixture '{}' miscounts '{}'",
                name,
                severity
            );
        }
    }
}

#[test]
fn all_fixture_configs_validate_against_schema() {
    let validator = compile(schema_for!(spokecheck_settings::SpokecheckConfigV1));

    for (name, path) in fixture_files("spokecheck.toml") {
        let content = std::fs::read_to_string(&path).expect("read config");
        let parsed: toml::Value = toml::from_str(&content)
            .unwrap_or_else(|e| panic!("Fixture '{}' config is not TOML: {}", name, e));
        let value = serde_json::to_value(parsed).expect("toml to json");

        assert!(
            validator.is_valid(&value),
            "Fixture '{}' config does not match the config schema",
            name
        );
    }
}
