use crate::config::constants::PATTERN_BATCH_SIZE;
use crate::services::codacy_client::CodacyClient;
use crate::structs::api::pattern_config::{PatternConfig, PatternParameter};
use crate::structs::reconciliation::{MatchedPattern, ReconciliationResult};
use crate::structs::sync_outcome::SyncOutcome;

/// Applies a reconciliation against a coding standard via batched PATCH
/// calls. Batches are independent: a failed batch is recorded against every
/// pattern it carried and the remaining batches still run.
pub struct Synchronizer<'a> {
    client: &'a CodacyClient,
}

impl<'a> Synchronizer<'a> {
    pub fn new(client: &'a CodacyClient) -> Self {
        Self { client }
    }

    pub async fn apply(
        &self,
        reconciliation: &ReconciliationResult,
        organization: &str,
        standard_id: &str,
        tool_uuid: &str,
    ) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        log::info!(
            "enabling {} patterns and explicitly disabling {} others",
            reconciliation.to_enable.len(),
            reconciliation.to_disable.len()
        );

        for batch in reconciliation.to_enable.chunks(PATTERN_BATCH_SIZE) {
            let configs: Vec<PatternConfig> = batch.iter().map(enable_config).collect();
            match self
                .patch(organization, standard_id, tool_uuid, configs)
                .await
            {
                Ok(()) => outcome.enabled_ok.extend_from_slice(batch),
                Err(reason) => {
                    log::warn!("enable batch of {} patterns failed: {reason}", batch.len());
                    for matched in batch {
                        outcome.enabled_failed.push((matched.clone(), reason.clone()));
                    }
                }
            }
        }

        for batch in reconciliation.to_disable.chunks(PATTERN_BATCH_SIZE) {
            let configs: Vec<PatternConfig> = batch
                .iter()
                .map(|p| PatternConfig::disabled(&p.id))
                .collect();
            match self
                .patch(organization, standard_id, tool_uuid, configs)
                .await
            {
                Ok(()) => outcome.disabled_ok.extend_from_slice(batch),
                Err(reason) => {
                    log::warn!("disable batch of {} patterns failed: {reason}", batch.len());
                    for pattern in batch {
                        outcome.disabled_failed.push((pattern.clone(), reason.clone()));
                    }
                }
            }
        }

        outcome
    }

    async fn patch(
        &self,
        organization: &str,
        standard_id: &str,
        tool_uuid: &str,
        patterns: Vec<PatternConfig>,
    ) -> Result<(), String> {
        let body = crate::structs::api::tool_patch_request::ToolPatchRequest {
            enabled: true,
            patterns,
        };
        self.client
            .patch_tool(organization, standard_id, tool_uuid, &body)
            .await
            .map_err(|e| e.to_string())
    }
}

fn enable_config(matched: &MatchedPattern) -> PatternConfig {
    let parameters = if matched.rule.parameters.is_empty() {
        None
    } else {
        Some(
            matched
                .rule
                .parameters
                .iter()
                .map(|(name, value)| PatternParameter {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
        )
    };
    PatternConfig {
        id: matched.pattern.id.clone(),
        enabled: true,
        parameters,
    }
}
