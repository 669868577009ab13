use std::collections::BTreeMap;

use crate::structs::pattern::RemotePattern;
use crate::structs::reconciliation::{MatchedPattern, ReconciliationResult};
use crate::structs::rule::SonarRule;

/// Computes the enable/disable decisions that make the remote pattern state
/// match the desired rule list. Pure: no I/O, no time, no randomness —
/// identical inputs always produce identical results.
pub struct Reconciler;

impl Reconciler {
    /// Policy: disable everything, then enable only the specified rules.
    ///
    /// Duplicate patterns sharing one rule key are tie-broken by preferring
    /// the already-enabled pattern, then the lowest pattern id. Losers are
    /// returned as unresolved duplicates and are never disabled.
    pub fn reconcile(
        desired: &[SonarRule],
        available: &[RemotePattern],
    ) -> ReconciliationResult {
        let mut groups: BTreeMap<&str, Vec<&RemotePattern>> = BTreeMap::new();
        for pattern in available {
            // Patterns from other tools carry no rule key; they group alone
            // under their own id and fall through to the disable set.
            let key = pattern.rule_key().unwrap_or(&pattern.id);
            groups.entry(key).or_default().push(pattern);
        }

        let mut chosen: BTreeMap<&str, &RemotePattern> = BTreeMap::new();
        let mut unresolved_duplicates: Vec<RemotePattern> = Vec::new();
        for (key, mut candidates) in groups {
            candidates.sort_by(|a, b| a.id.cmp(&b.id));
            let winner = candidates
                .iter()
                .find(|p| p.enabled)
                .copied()
                .unwrap_or(candidates[0]);
            for loser in candidates.into_iter().filter(|p| p.id != winner.id) {
                log::warn!(
                    "rule key '{}' maps to multiple patterns; '{}' left unresolved in favor of '{}'",
                    key,
                    loser.id,
                    winner.id
                );
                unresolved_duplicates.push(loser.clone());
            }
            chosen.insert(key, winner);
        }

        let mut to_enable: Vec<MatchedPattern> = Vec::new();
        let mut skipped: Vec<SonarRule> = Vec::new();
        let mut enabled_keys: Vec<&str> = Vec::new();
        for rule in desired {
            match chosen.get(rule.key.as_str()) {
                Some(pattern) => {
                    enabled_keys.push(rule.key.as_str());
                    to_enable.push(MatchedPattern {
                        pattern: (*pattern).clone(),
                        rule: rule.clone(),
                    });
                }
                None => skipped.push(rule.clone()),
            }
        }

        for key in enabled_keys {
            chosen.remove(key);
        }
        let mut to_disable: Vec<RemotePattern> =
            chosen.into_values().cloned().collect();

        to_enable.sort_by(|a, b| a.pattern.id.cmp(&b.pattern.id));
        to_disable.sort_by(|a, b| a.id.cmp(&b.id));
        skipped.sort_by(|a, b| a.key.cmp(&b.key));
        unresolved_duplicates.sort_by(|a, b| a.id.cmp(&b.id));

        ReconciliationResult {
            to_enable,
            to_disable,
            skipped,
            unresolved_duplicates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::enums::severity::Severity;

    fn rule(key: &str) -> SonarRule {
        SonarRule {
            repository_key: "csharpsquid".to_string(),
            key: key.to_string(),
            severity: Severity::Major,
            parameters: BTreeMap::new(),
        }
    }

    fn pattern(id: &str, enabled: bool) -> RemotePattern {
        RemotePattern::new(id, enabled)
    }

    #[test]
    fn disjoint_inputs_skip_everything_and_disable_everything() {
        let desired = vec![rule("S100"), rule("S200")];
        let available = vec![
            pattern("SonarCSharp_S300", true),
            pattern("SonarCSharp_S400", false),
        ];

        let result = Reconciler::reconcile(&desired, &available);

        assert!(result.to_enable.is_empty());
        assert_eq!(result.skipped.len(), 2);
        assert_eq!(result.to_disable.len(), 2);
        assert!(result.unresolved_duplicates.is_empty());
    }

    #[test]
    fn desired_subset_of_available_skips_nothing() {
        let desired = vec![rule("S100"), rule("S200")];
        let available = vec![
            pattern("SonarCSharp_S100", false),
            pattern("SonarCSharp_S200", true),
            pattern("SonarCSharp_S300", true),
        ];

        let result = Reconciler::reconcile(&desired, &available);

        assert_eq!(result.to_enable.len(), desired.len());
        assert!(result.skipped.is_empty());
        assert_eq!(result.to_disable.len(), 1);
        assert_eq!(result.to_disable[0].id, "SonarCSharp_S300");
    }

    #[test]
    fn reconcile_is_deterministic_and_idempotent() {
        let desired = vec![rule("S200"), rule("S100"), rule("S500")];
        let available = vec![
            pattern("SonarCSharp_S100", true),
            pattern("SonarCSharp_S200", false),
            pattern("SonarCSharp_S300", true),
        ];

        let first = Reconciler::reconcile(&desired, &available);
        let second = Reconciler::reconcile(&desired, &available);

        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_key_prefers_the_enabled_pattern() {
        // Two catalog entries map to S100: the enabled one wins, the
        // disabled one is surfaced as unresolved, not falsely disabled.
        let desired = vec![rule("S100")];
        let available = vec![
            RemotePattern::with_rule_key("SonarCSharp_S100_legacy", "S100", false),
            RemotePattern::with_rule_key("SonarCSharp_S100", "S100", true),
        ];

        let result = Reconciler::reconcile(&desired, &available);

        assert_eq!(result.to_enable.len(), 1);
        assert_eq!(result.to_enable[0].pattern.id, "SonarCSharp_S100");
        assert!(result.to_disable.is_empty());
        assert_eq!(result.unresolved_duplicates.len(), 1);
        assert_eq!(result.unresolved_duplicates[0].id, "SonarCSharp_S100_legacy");
    }

    #[test]
    fn duplicate_key_with_nothing_enabled_picks_the_lowest_id() {
        let desired = vec![rule("S100")];
        let available = vec![
            RemotePattern::with_rule_key("SonarCSharp_S100_b", "S100", false),
            RemotePattern::with_rule_key("SonarCSharp_S100_a", "S100", false),
        ];

        let result = Reconciler::reconcile(&desired, &available);

        assert_eq!(result.to_enable.len(), 1);
        assert_eq!(result.to_enable[0].pattern.id, "SonarCSharp_S100_a");
        assert_eq!(result.unresolved_duplicates.len(), 1);
        assert_eq!(result.unresolved_duplicates[0].id, "SonarCSharp_S100_b");
    }

    #[test]
    fn end_to_end_enable_disable_skip_scenario() {
        let desired = vec![rule("S100"), rule("S200")];
        let available = vec![
            pattern("SonarCSharp_S100", false),
            pattern("SonarCSharp_S300", true),
        ];

        let result = Reconciler::reconcile(&desired, &available);

        assert_eq!(result.to_enable.len(), 1);
        assert_eq!(result.to_enable[0].pattern.id, "SonarCSharp_S100");
        assert_eq!(result.to_disable.len(), 1);
        assert_eq!(result.to_disable[0].id, "SonarCSharp_S300");
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].key, "S200");
    }
}
