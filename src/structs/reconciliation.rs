use crate::structs::pattern::RemotePattern;
use crate::structs::rule::SonarRule;

/// A pattern chosen for enabling together with the XML rule that matched it,
/// so the rule's parameters and severity travel to the synchronizer and the
/// reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPattern {
    pub pattern: RemotePattern,
    pub rule: SonarRule,
}

/// The reconciler's decision set. Derived and ephemeral.
///
/// Every desired rule appears in exactly one of {`to_enable` (via its
/// matched pattern), `skipped`}; every available pattern appears in exactly
/// one of {`to_enable`, `to_disable`, `unresolved_duplicates`}.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconciliationResult {
    pub to_enable: Vec<MatchedPattern>,
    pub to_disable: Vec<RemotePattern>,
    pub skipped: Vec<SonarRule>,
    /// Duplicate patterns sharing a rule key that lost the tie-break. They
    /// are surfaced instead of silently dropped, and never disabled.
    pub unresolved_duplicates: Vec<RemotePattern>,
}

impl ReconciliationResult {
    pub fn is_empty(&self) -> bool {
        self.to_enable.is_empty() && self.to_disable.is_empty()
    }
}
