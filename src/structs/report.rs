use std::collections::BTreeMap;

use serde::Serialize;

use crate::enums::severity::Severity;

/// Header block shared by both report files.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total: usize,
    pub coding_standard: String,
    pub organization: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRuleEntry {
    pub rule_key: String,
    pub pattern_id: String,
    pub repository_key: String,
    pub priority: Severity,
    pub reason: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnabledPatternEntry {
    pub pattern_id: String,
    pub rule_key: String,
    pub repository_key: String,
    pub priority: Severity,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRulesReport {
    pub summary: ReportSummary,
    pub skipped_rules: Vec<SkippedRuleEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnabledPatternsReport {
    pub summary: ReportSummary,
    pub enabled_patterns: Vec<EnabledPatternEntry>,
}
