use std::collections::{HashMap, HashSet};

use reqwest::{Client, Response};

use crate::config::constants::{http_timeout, CODACY_BASE_URL, DEFAULT_PROVIDER};
use crate::errors::{ImporterError, ImporterResult};
use crate::structs::api::coding_standard::{CodingStandard, CreateStandardResponse, StandardsResponse};
use crate::structs::api::create_standard_request::CreateStandardRequest;
use crate::structs::api::patterns_response::PatternsResponse;
use crate::structs::api::tool::{Tool, ToolsResponse};
use crate::structs::api::tool_patch_request::ToolPatchRequest;
use crate::structs::pattern::RemotePattern;

/// Thin client over the Codacy v3 API. Every call carries the `api-token`
/// header and an explicit per-request timeout; no automatic retry.
pub struct CodacyClient {
    http: Client,
    base_url: String,
    token: String,
}

impl CodacyClient {
    pub fn new(token: String) -> ImporterResult<Self> {
        Self::with_base_url(CODACY_BASE_URL.to_string(), token)
    }

    pub fn with_base_url(base_url: String, token: String) -> ImporterResult<Self> {
        let http = Client::builder()
            .timeout(http_timeout())
            .build()
            .map_err(|e| ImporterError::Http {
                operation: "building HTTP client".to_string(),
                source: e,
            })?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn org_url(&self, organization: &str, tail: &str) -> String {
        format!(
            "{}/organizations/{}/{}/coding-standards{}",
            self.base_url, DEFAULT_PROVIDER, organization, tail
        )
    }

    async fn send(&self, operation: &str, request: reqwest::RequestBuilder) -> ImporterResult<Response> {
        let response = request
            .header("api-token", &self.token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ImporterError::Http {
                operation: operation.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImporterError::from_status(operation, status.as_u16(), body));
        }
        Ok(response)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        operation: &str,
        response: Response,
    ) -> ImporterResult<T> {
        response.json().await.map_err(|e| ImporterError::Http {
            operation: operation.to_string(),
            source: e,
        })
    }

    /// Walks a cursor-paginated pattern listing to exhaustion. Pages are
    /// concatenated in request order and deduplicated by pattern id; a
    /// missing cursor is the end marker. A failed page is fatal — the caller
    /// cannot reconcile against a partial catalog.
    async fn fetch_patterns_paginated(
        &self,
        operation: &str,
        url: &str,
    ) -> ImporterResult<Vec<RemotePattern>> {
        let mut patterns = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self.http.get(url);
            if let Some(ref c) = cursor {
                request = request.query(&[("cursor", c)]);
            }
            let response = self.send(operation, request).await?;
            let page: PatternsResponse = Self::decode(operation, response).await?;
            cursor = page.next_cursor();

            for item in page.data {
                let pattern: RemotePattern = item.into();
                if seen.insert(pattern.id.clone()) {
                    patterns.push(pattern);
                }
            }

            if cursor.is_none() {
                break;
            }
        }

        Ok(patterns)
    }

    /// All patterns Codacy knows for a tool, regardless of any standard.
    pub async fn fetch_tool_patterns(&self, tool_uuid: &str) -> ImporterResult<Vec<RemotePattern>> {
        let url = format!("{}/tools/{}/patterns", self.base_url, tool_uuid);
        let patterns = self
            .fetch_patterns_paginated("listing tool patterns", &url)
            .await?;
        log::info!("retrieved {} available patterns from Codacy", patterns.len());
        Ok(patterns)
    }

    /// Current pattern state of one tool inside a coding standard.
    pub async fn fetch_standard_patterns(
        &self,
        organization: &str,
        standard_id: &str,
        tool_uuid: &str,
    ) -> ImporterResult<Vec<RemotePattern>> {
        let url = self.org_url(
            organization,
            &format!("/{standard_id}/tools/{tool_uuid}/patterns"),
        );
        self.fetch_patterns_paginated("listing coding-standard patterns", &url)
            .await
    }

    /// Available tools as a lowercase-name → uuid map.
    pub async fn list_tools(&self) -> ImporterResult<HashMap<String, String>> {
        let operation = "listing tools";
        let url = format!("{}/tools", self.base_url);
        let response = self.send(operation, self.http.get(&url)).await?;
        let tools: ToolsResponse = Self::decode(operation, response).await?;

        let map: HashMap<String, String> = tools
            .data
            .into_iter()
            .map(|t| (t.name.to_lowercase(), t.uuid))
            .collect();
        log::info!("mapped {} tool UUIDs", map.len());
        Ok(map)
    }

    pub async fn list_coding_standards(
        &self,
        organization: &str,
    ) -> ImporterResult<Vec<CodingStandard>> {
        let operation = "listing coding standards";
        let url = self.org_url(organization, "");
        let response = self.send(operation, self.http.get(&url)).await?;
        let standards: StandardsResponse = Self::decode(operation, response).await?;
        Ok(standards.data)
    }

    /// Picks a standard name not already taken in the organization by
    /// appending ` (n)`. A listing failure only costs uniqueness, so it is
    /// logged and the desired name returned as-is.
    pub async fn unique_standard_name(&self, organization: &str, desired: &str) -> String {
        let existing: HashSet<String> = match self.list_coding_standards(organization).await {
            Ok(standards) => standards.into_iter().map(|s| s.name).collect(),
            Err(e) => {
                log::warn!("could not check existing standard names: {e}");
                return desired.to_string();
            }
        };

        if !existing.contains(desired) {
            return desired.to_string();
        }
        let mut counter = 1;
        while existing.contains(&format!("{desired} ({counter})")) {
            counter += 1;
        }
        let unique = format!("{desired} ({counter})");
        log::info!("standard name '{desired}' already exists, using '{unique}'");
        unique
    }

    pub async fn create_coding_standard(
        &self,
        organization: &str,
        name: &str,
        languages: Vec<String>,
    ) -> ImporterResult<CodingStandard> {
        let operation = "creating coding standard";
        let url = self.org_url(organization, "");
        let body = CreateStandardRequest {
            name: name.to_string(),
            languages,
        };
        let response = self.send(operation, self.http.post(&url).json(&body)).await?;
        let created: CreateStandardResponse = Self::decode(operation, response).await?;
        log::info!("created coding standard '{}' with id {}", created.data.name, created.data.id);
        Ok(created.data)
    }

    /// Tools currently attached to a coding standard.
    pub async fn list_standard_tools(
        &self,
        organization: &str,
        standard_id: &str,
    ) -> ImporterResult<Vec<Tool>> {
        let operation = "listing coding-standard tools";
        let url = self.org_url(organization, &format!("/{standard_id}/tools"));
        let response = self.send(operation, self.http.get(&url)).await?;
        let tools: ToolsResponse = Self::decode(operation, response).await?;
        Ok(tools.data)
    }

    /// The one mutation: enable/disable a tool and a slice of its patterns.
    pub async fn patch_tool(
        &self,
        organization: &str,
        standard_id: &str,
        tool_uuid: &str,
        body: &ToolPatchRequest,
    ) -> ImporterResult<()> {
        let operation = "updating tool patterns";
        let url = self.org_url(organization, &format!("/{standard_id}/tools/{tool_uuid}"));
        self.send(operation, self.http.patch(&url).json(body)).await?;
        Ok(())
    }

    /// Promotes a draft coding standard to effective.
    pub async fn promote_coding_standard(
        &self,
        organization: &str,
        standard_id: &str,
    ) -> ImporterResult<()> {
        let operation = "promoting coding standard";
        let url = self.org_url(organization, &format!("/{standard_id}/promote"));
        self.send(operation, self.http.post(&url)).await?;
        log::info!("promoted coding standard {standard_id}");
        Ok(())
    }
}
