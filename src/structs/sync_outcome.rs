use crate::structs::pattern::RemotePattern;
use crate::structs::reconciliation::MatchedPattern;

/// Result of applying a reconciliation against the remote standard.
/// Failures are collected per pattern together with the error text; a
/// failed batch never aborts the remaining batches.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    pub enabled_ok: Vec<MatchedPattern>,
    pub enabled_failed: Vec<(MatchedPattern, String)>,
    pub disabled_ok: Vec<RemotePattern>,
    pub disabled_failed: Vec<(RemotePattern, String)>,
}

impl SyncOutcome {
    pub fn failure_count(&self) -> usize {
        self.enabled_failed.len() + self.disabled_failed.len()
    }

    pub fn total_count(&self) -> usize {
        self.enabled_ok.len() + self.disabled_ok.len() + self.failure_count()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }
}
