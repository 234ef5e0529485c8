//! JSON output formatting

use serde::{Deserialize, Serialize};
use testimpact_core::{ImpactReport, ImpactResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput {
    pub commit: String,
    pub results: Vec<JsonResult>,
    pub summary: JsonSummary,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResult {
    pub test_name: String,
    pub file: String,
    pub impact_type: String,
    pub indirect: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub indirect: usize,
    pub files_changed: usize,
}

/// Build the JSON document for one analyzed commit
pub fn build(commit: &str, report: &ImpactReport) -> JsonOutput {
    let summary = report.summary();

    JsonOutput {
        commit: commit.to_string(),
        results: report.results.iter().map(to_json_result).collect(),
        summary: JsonSummary {
            added: summary.added,
            removed: summary.removed,
            modified: summary.modified,
            indirect: summary.indirect,
            files_changed: summary.files_changed,
        },
        warnings: report.warnings.clone(),
    }
}

fn to_json_result(result: &ImpactResult) -> JsonResult {
    JsonResult {
        test_name: result.test_name.clone(),
        file: result.file.clone(),
        impact_type: result.impact_type.to_string(),
        indirect: result.indirect,
    }
}
