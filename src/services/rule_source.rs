use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::config::constants::SONAR_CSHARP_TOOL_NAME;
use crate::enums::severity::Severity;
use crate::errors::{ImporterError, ImporterResult};
use crate::structs::rule::SonarRule;

/// Loads desired rules from a SonarQube quality-profile XML export.
pub struct RuleSource;

/// SonarQube repository keys that map onto a Codacy tool. Both the main and
/// the security analyzer repositories feed the same SonarC# tool.
pub fn tool_for_repository(repository_key: &str) -> Option<&'static str> {
    match repository_key {
        "csharpsquid" | "roslyn.sonaranalyzer.security.cs" => Some(SONAR_CSHARP_TOOL_NAME),
        _ => None,
    }
}

#[derive(Default)]
struct RuleBuilder {
    repository_key: Option<String>,
    key: Option<String>,
    priority: Option<String>,
    parameters: BTreeMap<String, String>,
}

#[derive(Clone, Copy)]
enum Field {
    RepositoryKey,
    Key,
    Priority,
    ParamKey,
    ParamValue,
}

impl RuleSource {
    pub fn load(path: &Path) -> ImporterResult<Vec<SonarRule>> {
        log::info!("parsing SonarQube XML file: {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| ImporterError::io(format!("reading {}", path.display()), e))?;
        let rules = Self::parse(&content, &path.display().to_string())?;
        log::info!("parsed {} rules from {}", rules.len(), path.display());
        Ok(rules)
    }

    /// Parses `<rule>` elements with `repositoryKey`, `key`, `priority` and
    /// optional `parameters/parameter/{key,value}` children. A rule without
    /// a key is a parse error. Duplicate keys are deduplicated last-wins,
    /// with a warning per duplicate. Rules whose repository key maps to no
    /// known Codacy tool are dropped with a warning.
    pub fn parse(xml: &str, source: &str) -> ImporterResult<Vec<SonarRule>> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut rules: Vec<SonarRule> = Vec::new();
        let mut index_by_key: HashMap<String, usize> = HashMap::new();

        let mut current: Option<RuleBuilder> = None;
        let mut field: Option<Field> = None;
        let mut in_parameters = false;
        let mut in_parameter = false;
        let mut param_key: Option<String> = None;
        let mut param_value: Option<String> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| ImporterError::parse(source, e.to_string()))?;
            match event {
                Event::Start(e) => match e.name().as_ref() {
                    b"rule" => current = Some(RuleBuilder::default()),
                    b"parameters" if current.is_some() => in_parameters = true,
                    b"parameter" if in_parameters => {
                        in_parameter = true;
                        param_key = None;
                        param_value = None;
                    }
                    b"repositoryKey" if current.is_some() && !in_parameters => {
                        field = Some(Field::RepositoryKey)
                    }
                    b"key" if in_parameter => field = Some(Field::ParamKey),
                    b"key" if current.is_some() && !in_parameters => field = Some(Field::Key),
                    b"value" if in_parameter => field = Some(Field::ParamValue),
                    b"priority" if current.is_some() && !in_parameters => {
                        field = Some(Field::Priority)
                    }
                    _ => {}
                },
                Event::Text(t) => {
                    let text = t
                        .unescape()
                        .map_err(|e| ImporterError::parse(source, e.to_string()))?
                        .into_owned();
                    if let Some(builder) = current.as_mut() {
                        match field {
                            Some(Field::RepositoryKey) => builder.repository_key = Some(text),
                            Some(Field::Key) => builder.key = Some(text),
                            Some(Field::Priority) => builder.priority = Some(text),
                            Some(Field::ParamKey) => param_key = Some(text),
                            Some(Field::ParamValue) => param_value = Some(text),
                            None => {}
                        }
                    }
                }
                Event::End(e) => {
                    field = None;
                    match e.name().as_ref() {
                        b"parameters" => in_parameters = false,
                        b"parameter" => {
                            in_parameter = false;
                            if let (Some(builder), Some(k)) = (current.as_mut(), param_key.take())
                            {
                                builder
                                    .parameters
                                    .insert(k, param_value.take().unwrap_or_default());
                            }
                        }
                        b"rule" => {
                            let builder = current.take().unwrap_or_default();
                            if let Some(rule) = Self::finish_rule(builder, source)? {
                                match index_by_key.get(&rule.key) {
                                    // Last occurrence wins; surfaced, not silent.
                                    Some(&i) => {
                                        log::warn!(
                                            "duplicate rule key '{}' in {}; keeping the last occurrence",
                                            rule.key,
                                            source
                                        );
                                        rules[i] = rule;
                                    }
                                    None => {
                                        index_by_key.insert(rule.key.clone(), rules.len());
                                        rules.push(rule);
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(rules)
    }

    fn finish_rule(builder: RuleBuilder, source: &str) -> ImporterResult<Option<SonarRule>> {
        let key = builder
            .key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ImporterError::parse(source, "rule element without a key"))?;

        let repository_key = builder.repository_key.unwrap_or_default();
        if tool_for_repository(&repository_key).is_none() {
            log::warn!(
                "unknown repository key '{}' for rule '{}'; rule dropped",
                repository_key,
                key
            );
            return Ok(None);
        }

        let severity = match builder.priority.as_deref() {
            Some(p) => p.parse().unwrap_or_else(|e: String| {
                log::warn!("rule '{}': {}; defaulting to MAJOR", key, e);
                Severity::Major
            }),
            None => {
                log::warn!("rule '{}' has no priority; defaulting to MAJOR", key);
                Severity::Major
            }
        };

        Ok(Some(SonarRule {
            repository_key,
            key,
            severity,
            parameters: builder.parameters,
        }))
    }
}
