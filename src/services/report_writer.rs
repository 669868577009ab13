use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::constants::{
    ENABLED_REPORT_PREFIX, REPORT_TIMESTAMP_FORMAT, SKIPPED_REPORT_PREFIX,
};
use crate::errors::{ImporterError, ImporterResult};
use crate::structs::report::{
    EnabledPatternEntry, EnabledPatternsReport, ReportSummary, SkippedRuleEntry,
    SkippedRulesReport,
};
use crate::structs::rule::SonarRule;
use crate::structs::sync_outcome::SyncOutcome;

pub struct ReportMeta {
    pub coding_standard: String,
    pub organization: String,
}

#[derive(Debug)]
pub struct ReportPaths {
    pub skipped: PathBuf,
    pub enabled: PathBuf,
}

/// Serializes a run's outcome to a timestamped pair of JSON files. Not
/// idempotent: each invocation produces a new pair, which is the accepted
/// behavior — runs are audit records, not state.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Writes `skipped_rules_<ts>.json` (rules with no remote pattern plus
    /// patterns whose enable call failed) and `enabled_patterns_<ts>.json`
    /// (patterns confirmed enabled).
    pub fn write(
        &self,
        outcome: &SyncOutcome,
        skipped: &[SonarRule],
        meta: &ReportMeta,
        timestamp: DateTime<Local>,
    ) -> ImporterResult<ReportPaths> {
        let suffix = timestamp.format(REPORT_TIMESTAMP_FORMAT).to_string();
        let iso = timestamp.to_rfc3339();

        let mut skipped_entries: Vec<SkippedRuleEntry> = skipped
            .iter()
            .map(|rule| SkippedRuleEntry {
                rule_key: rule.key.clone(),
                pattern_id: rule.pattern_id(),
                repository_key: rule.repository_key.clone(),
                priority: rule.severity,
                reason: "Pattern not available in Codacy".to_string(),
            })
            .collect();
        for (matched, reason) in &outcome.enabled_failed {
            skipped_entries.push(SkippedRuleEntry {
                rule_key: matched.rule.key.clone(),
                pattern_id: matched.pattern.id.clone(),
                repository_key: matched.rule.repository_key.clone(),
                priority: matched.rule.severity,
                reason: format!("Enable call failed: {reason}"),
            });
        }

        let enabled_entries: Vec<EnabledPatternEntry> = outcome
            .enabled_ok
            .iter()
            .map(|matched| EnabledPatternEntry {
                pattern_id: matched.pattern.id.clone(),
                rule_key: matched.rule.key.clone(),
                repository_key: matched.rule.repository_key.clone(),
                priority: matched.rule.severity,
                parameters: matched.rule.parameters.clone(),
            })
            .collect();

        let skipped_report = SkippedRulesReport {
            summary: ReportSummary {
                total: skipped_entries.len(),
                coding_standard: meta.coding_standard.clone(),
                organization: meta.organization.clone(),
                timestamp: iso.clone(),
            },
            skipped_rules: skipped_entries,
        };
        let enabled_report = EnabledPatternsReport {
            summary: ReportSummary {
                total: enabled_entries.len(),
                coding_standard: meta.coding_standard.clone(),
                organization: meta.organization.clone(),
                timestamp: iso,
            },
            enabled_patterns: enabled_entries,
        };

        let skipped_path = self
            .output_dir
            .join(format!("{SKIPPED_REPORT_PREFIX}_{suffix}.json"));
        let enabled_path = self
            .output_dir
            .join(format!("{ENABLED_REPORT_PREFIX}_{suffix}.json"));

        write_json(&skipped_path, &skipped_report)?;
        write_json(&enabled_path, &enabled_report)?;

        log::info!(
            "generated output files: {} ({} rules), {} ({} patterns)",
            skipped_path.display(),
            skipped_report.skipped_rules.len(),
            enabled_path.display(),
            enabled_report.enabled_patterns.len()
        );

        Ok(ReportPaths {
            skipped: skipped_path,
            enabled: enabled_path,
        })
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> ImporterResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
        .map_err(|e| ImporterError::io(format!("writing report {}", path.display()), e))
}
