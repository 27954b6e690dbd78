//! Shared helpers for the integration tests

use std::path::Path;

use ha_inclusion::{parse_reports, InclusionReport};

/// Load a fixture file from `tests/fixtures/`
pub fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);

    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}' from {:?}: {}", name, path, e))
}

/// Load and parse the inclusion report(s) of a fixture
pub fn load_reports(name: &str) -> Vec<InclusionReport> {
    parse_reports(&load_fixture(name))
        .unwrap_or_else(|e| panic!("Failed to parse fixture '{}': {}", name, e))
}

/// Load a fixture holding exactly one report
#[allow(dead_code)]
pub fn load_report(name: &str) -> InclusionReport {
    let mut reports = load_reports(name);
    assert_eq!(reports.len(), 1, "fixture '{}' holds {} reports", name, reports.len());
    reports.remove(0)
}
