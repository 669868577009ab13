use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::time::Instant;

use chrono::Local;

use crate::config::constants::{
    DEFAULT_STANDARD_LANGUAGE, SONAR_CSHARP_TOOL_NAME, SONAR_CSHARP_TOOL_UUID,
};
use crate::config::credentials::resolve_api_token;
use crate::enums::commands::Commands;
use crate::errors::{ImporterError, ImporterResult};
use crate::services::codacy_client::CodacyClient;
use crate::services::reconciler::Reconciler;
use crate::services::report_writer::{ReportMeta, ReportWriter};
use crate::services::rule_source::RuleSource;
use crate::services::synchronizer::Synchronizer;
use crate::structs::api::tool_patch_request::ToolPatchRequest;
use crate::structs::pattern::RemotePattern;
use crate::structs::rule::SonarRule;

pub struct CommandRunner;

impl CommandRunner {
    pub async fn run_command(command: Commands) -> ImporterResult<()> {
        let start = Instant::now();

        let result = match command {
            Commands::Import {
                organization,
                standard_name,
                xml_file,
                api_token,
            } => Self::import_command(organization, standard_name, xml_file, api_token).await,
            Commands::CheckMissing {
                xml_file,
                api_token,
            } => Self::check_missing_command(xml_file, api_token).await,
            Commands::Verify {
                organization,
                standard_id,
                xml_file,
                api_token,
            } => Self::verify_command(organization, standard_id, xml_file, api_token).await,
            Commands::DefaultPatterns {
                xml_file,
                api_token,
            } => Self::default_patterns_command(xml_file, api_token).await,
        };

        log::info!("command completed in {:.2}s", start.elapsed().as_secs_f64());
        result
    }

    /// Full import pipeline: parse XML, discover tools, create a standard,
    /// disable everything, enable only the XML rules, promote, report.
    async fn import_command(
        organization: String,
        standard_name: String,
        xml_file: String,
        api_token: Option<String>,
    ) -> ImporterResult<()> {
        let token = resolve_api_token(api_token)?;
        let rules = RuleSource::load(Path::new(&xml_file))?;
        let client = CodacyClient::new(token)?;

        let tool_uuid = Self::sonar_tool_uuid(&client).await?;

        // The full catalog is read before any mutation so a failed read
        // never leaves a half-configured standard behind.
        let available = client.fetch_tool_patterns(&tool_uuid).await?;

        let name = client
            .unique_standard_name(&organization, &standard_name)
            .await;
        let standard = client
            .create_coding_standard(
                &organization,
                &name,
                vec![DEFAULT_STANDARD_LANGUAGE.to_string()],
            )
            .await?;
        let standard_id = standard.id.to_string();

        Self::disable_all_tools(&client, &organization, &standard_id).await?;

        let current = client
            .fetch_standard_patterns(&organization, &standard_id, &tool_uuid)
            .await?;
        let merged = merge_enabled_state(available, &current);

        let reconciliation = Reconciler::reconcile(&rules, &merged);
        if !reconciliation.skipped.is_empty() {
            log::warn!(
                "{} rules from the XML don't exist in Codacy and will be skipped",
                reconciliation.skipped.len()
            );
            for rule in reconciliation.skipped.iter().take(10) {
                log::warn!("  - {}", rule.key);
            }
            if reconciliation.skipped.len() > 10 {
                log::warn!("  ... and {} more", reconciliation.skipped.len() - 10);
            }
        }

        let outcome = Synchronizer::new(&client)
            .apply(&reconciliation, &organization, &standard_id, &tool_uuid)
            .await;

        client
            .promote_coding_standard(&organization, &standard_id)
            .await?;

        let meta = ReportMeta {
            coding_standard: name.clone(),
            organization: organization.clone(),
        };
        ReportWriter::new(".").write(&outcome, &reconciliation.skipped, &meta, Local::now())?;

        log::info!("created coding standard: {name} (id {standard_id})");
        log::info!("rules in XML: {}", rules.len());
        log::info!("patterns enabled: {}", outcome.enabled_ok.len());
        log::info!("rules skipped: {}", reconciliation.skipped.len());

        if outcome.has_failures() {
            return Err(ImporterError::PartialSync {
                failed: outcome.failure_count(),
                total: outcome.total_count(),
            });
        }
        Ok(())
    }

    async fn check_missing_command(
        xml_file: String,
        api_token: Option<String>,
    ) -> ImporterResult<()> {
        let token = resolve_api_token(api_token)?;
        let rules = RuleSource::load(Path::new(&xml_file))?;
        let client = CodacyClient::new(token)?;
        let patterns = client.fetch_tool_patterns(SONAR_CSHARP_TOOL_UUID).await?;

        let xml_keys = rule_keys(&rules);
        let remote_keys = pattern_rule_keys(&patterns);

        let missing: Vec<&String> = xml_keys.difference(&remote_keys).collect();
        let extra: Vec<&String> = remote_keys.difference(&xml_keys).collect();

        if !missing.is_empty() {
            println!("Rules in XML but NOT in Codacy ({}):", missing.len());
            for key in &missing {
                println!("  - {key}");
            }
        }
        if !extra.is_empty() {
            println!("Patterns in Codacy but NOT in XML ({}):", extra.len());
            for key in &extra {
                println!("  + {key}");
            }
        }

        println!("Summary:");
        println!("  XML rules: {}", xml_keys.len());
        println!("  Codacy patterns: {}", remote_keys.len());
        println!("  Missing in Codacy: {}", missing.len());
        println!("  Extra in Codacy: {}", extra.len());
        println!(
            "  Matching rules: {}",
            xml_keys.intersection(&remote_keys).count()
        );
        Ok(())
    }

    async fn verify_command(
        organization: String,
        standard_id: String,
        xml_file: String,
        api_token: Option<String>,
    ) -> ImporterResult<()> {
        let token = resolve_api_token(api_token)?;
        let rules = RuleSource::load(Path::new(&xml_file))?;
        let client = CodacyClient::new(token)?;

        let patterns = client
            .fetch_standard_patterns(&organization, &standard_id, SONAR_CSHARP_TOOL_UUID)
            .await?;
        let enabled: Vec<RemotePattern> =
            patterns.into_iter().filter(|p| p.enabled).collect();

        let xml_keys = rule_keys(&rules);
        let enabled_keys = pattern_rule_keys(&enabled);

        let missing: Vec<&String> = xml_keys.difference(&enabled_keys).collect();
        let extra: Vec<&String> = enabled_keys.difference(&xml_keys).collect();
        let matching = xml_keys.intersection(&enabled_keys).count();

        println!("Verifying coding standard {standard_id}");
        if !missing.is_empty() {
            println!(
                "Rules in XML but NOT enabled in the coding standard ({}):",
                missing.len()
            );
            for key in &missing {
                println!("  - {key}");
            }
        }
        if !extra.is_empty() {
            println!(
                "Patterns enabled in the coding standard but NOT in XML ({}):",
                extra.len()
            );
            for key in &extra {
                println!("  + {key}");
            }
        }

        println!("Summary:");
        println!("  XML rules: {}", xml_keys.len());
        println!("  Enabled patterns: {}", enabled_keys.len());
        println!("  Missing from standard: {}", missing.len());
        println!("  Extra in standard: {}", extra.len());
        println!("  Correctly enabled: {matching}");
        if !xml_keys.is_empty() {
            let rate = (matching as f64 / xml_keys.len() as f64) * 100.0;
            println!("  Success rate: {rate:.1}%");
        }
        Ok(())
    }

    async fn default_patterns_command(
        xml_file: String,
        api_token: Option<String>,
    ) -> ImporterResult<()> {
        let token = resolve_api_token(api_token)?;
        let rules = RuleSource::load(Path::new(&xml_file))?;
        let client = CodacyClient::new(token)?;
        let patterns = client.fetch_tool_patterns(SONAR_CSHARP_TOOL_UUID).await?;

        let xml_keys = rule_keys(&rules);
        let remote_keys = pattern_rule_keys(&patterns);

        let missing: Vec<&String> = xml_keys.difference(&remote_keys).collect();
        let extra = remote_keys.difference(&xml_keys).count();

        println!("Rules in XML: {}", xml_keys.len());
        println!("Total SonarC# patterns available: {}", remote_keys.len());
        println!(
            "Patterns in XML that exist in Codacy: {}",
            xml_keys.intersection(&remote_keys).count()
        );
        println!("Patterns in XML that DON'T exist in Codacy: {}", missing.len());
        println!("Extra patterns in Codacy (not in XML): {extra}");

        if !missing.is_empty() {
            println!("Rules in XML but NOT in Codacy ({}):", missing.len());
            for key in missing.iter().take(10) {
                println!("  - {key}");
            }
            if missing.len() > 10 {
                println!("  ... and {} more", missing.len() - 10);
            }
        }
        Ok(())
    }

    /// Resolves the SonarC# tool uuid from the live tool listing, falling
    /// back to the well-known uuid if the listing no longer carries the name.
    async fn sonar_tool_uuid(client: &CodacyClient) -> ImporterResult<String> {
        let tools: HashMap<String, String> = client.list_tools().await?;
        match tools.get(&SONAR_CSHARP_TOOL_NAME.to_lowercase()) {
            Some(uuid) => Ok(uuid.clone()),
            None => {
                log::warn!(
                    "tool '{}' not found in the listing; using the well-known uuid",
                    SONAR_CSHARP_TOOL_NAME
                );
                Ok(SONAR_CSHARP_TOOL_UUID.to_string())
            }
        }
    }

    /// Switches every tool of a fresh standard off so only the patterns the
    /// reconciler enables end up active. A tool that fails to disable is
    /// logged and skipped; the reconciler's disable set still covers its
    /// patterns where they belong to the SonarC# tool.
    async fn disable_all_tools(
        client: &CodacyClient,
        organization: &str,
        standard_id: &str,
    ) -> ImporterResult<()> {
        let tools = client.list_standard_tools(organization, standard_id).await?;
        log::info!("disabling {} tools on the new standard", tools.len());
        for tool in tools {
            if let Err(e) = client
                .patch_tool(
                    organization,
                    standard_id,
                    &tool.uuid,
                    &ToolPatchRequest::disable_tool(),
                )
                .await
            {
                log::warn!("could not disable tool {}: {e}", tool.uuid);
            }
        }
        Ok(())
    }
}

fn rule_keys(rules: &[SonarRule]) -> BTreeSet<String> {
    rules.iter().map(|r| r.key.clone()).collect()
}

fn pattern_rule_keys(patterns: &[RemotePattern]) -> BTreeSet<String> {
    patterns
        .iter()
        .filter_map(|p| p.rule_key().map(str::to_string))
        .collect()
}

/// Overlays the standard's current enabled flags onto the tool catalog.
/// Catalog entries absent from the standard count as disabled.
fn merge_enabled_state(
    catalog: Vec<RemotePattern>,
    current: &[RemotePattern],
) -> Vec<RemotePattern> {
    let state: HashMap<&str, bool> = current
        .iter()
        .map(|p| (p.id.as_str(), p.enabled))
        .collect();
    catalog
        .into_iter()
        .map(|mut p| {
            p.enabled = state.get(p.id.as_str()).copied().unwrap_or(false);
            p
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overlays_current_state_onto_the_catalog() {
        let catalog = vec![
            RemotePattern::new("SonarCSharp_S100", true),
            RemotePattern::new("SonarCSharp_S200", false),
        ];
        let current = vec![RemotePattern::new("SonarCSharp_S200", true)];

        let merged = merge_enabled_state(catalog, &current);

        assert!(!merged[0].enabled, "absent from standard counts as disabled");
        assert!(merged[1].enabled);
    }
}
