use std::collections::BTreeMap;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use codacy_sonar_importer::enums::severity::Severity;
use codacy_sonar_importer::errors::ImporterError;
use codacy_sonar_importer::services::codacy_client::CodacyClient;
use codacy_sonar_importer::services::reconciler::Reconciler;
use codacy_sonar_importer::services::report_writer::{ReportMeta, ReportWriter};
use codacy_sonar_importer::services::synchronizer::Synchronizer;
use codacy_sonar_importer::structs::pattern::RemotePattern;
use codacy_sonar_importer::structs::rule::SonarRule;

fn client_for(server: &MockServer) -> CodacyClient {
    CodacyClient::with_base_url(server.uri(), "test-token".to_string()).unwrap()
}

fn rule(key: &str) -> SonarRule {
    SonarRule {
        repository_key: "csharpsquid".to_string(),
        key: key.to_string(),
        severity: Severity::Major,
        parameters: BTreeMap::new(),
    }
}

fn page(ids: &[(&str, bool)], cursor: Option<&str>) -> serde_json::Value {
    let data: Vec<serde_json::Value> = ids
        .iter()
        .map(|(id, enabled)| json!({"id": id, "enabled": enabled}))
        .collect();
    match cursor {
        Some(c) => json!({"data": data, "pagination": {"cursor": c}}),
        None => json!({"data": data, "pagination": {}}),
    }
}

#[tokio::test]
async fn pagination_walks_every_page_and_deduplicates() {
    let server = MockServer::start().await;
    let patterns_path = "/tools/tool-1/patterns";

    // Page 3 repeats a pattern from page 1; the duplicate must collapse.
    Mock::given(method("GET"))
        .and(path(patterns_path))
        .and(query_param("cursor", "c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            &[("SonarCSharp_S300", true), ("SonarCSharp_S400", false)],
            Some("c3"),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(patterns_path))
        .and(query_param("cursor", "c3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            &[("SonarCSharp_S500", false), ("SonarCSharp_S100", false)],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(patterns_path))
        .and(header("api-token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            &[("SonarCSharp_S100", false), ("SonarCSharp_S200", true)],
            Some("c2"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let patterns = client.fetch_tool_patterns("tool-1").await.unwrap();

    let ids: Vec<&str> = patterns.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "SonarCSharp_S100",
            "SonarCSharp_S200",
            "SonarCSharp_S300",
            "SonarCSharp_S400",
            "SonarCSharp_S500",
        ],
        "pages concatenated in request order, duplicate id collapsed"
    );
}

#[tokio::test]
async fn non_2xx_during_catalog_read_is_a_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tools/tool-1/patterns"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch_tool_patterns("tool-1").await.unwrap_err();

    match err {
        ImporterError::Remote { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_responses_become_auth_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tools/tool-1/patterns"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch_tool_patterns("tool-1").await.unwrap_err();
    assert!(matches!(err, ImporterError::Auth { .. }));
}

#[tokio::test]
async fn standard_pattern_listing_carries_enabled_flags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/organizations/gh/acme/coding-standards/42/tools/tool-1/patterns",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            &[("SonarCSharp_S100", true), ("SonarCSharp_S200", false)],
            None,
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let patterns = client
        .fetch_standard_patterns("acme", "42", "tool-1")
        .await
        .unwrap();

    assert_eq!(patterns.len(), 2);
    assert!(patterns[0].enabled);
    assert!(!patterns[1].enabled);
    assert_eq!(patterns[0].rule_key(), Some("S100"));
}

#[tokio::test]
async fn synchronizer_collects_failures_and_still_writes_a_report() {
    let server = MockServer::start().await;
    let patch_path = "/organizations/gh/acme/coding-standards/42/tools/tool-1";

    // The enable batch runs first and fails; the disable batch must still
    // run and succeed.
    Mock::given(method("PATCH"))
        .and(path(patch_path))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(patch_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let desired = vec![rule("S100"), rule("S200")];
    let available = vec![
        RemotePattern::new("SonarCSharp_S100", false),
        RemotePattern::new("SonarCSharp_S300", true),
    ];
    let reconciliation = Reconciler::reconcile(&desired, &available);

    let client = client_for(&server);
    let outcome = Synchronizer::new(&client)
        .apply(&reconciliation, "acme", "42", "tool-1")
        .await;

    assert_eq!(outcome.enabled_failed.len(), 1);
    assert_eq!(outcome.enabled_failed[0].0.pattern.id, "SonarCSharp_S100");
    assert_eq!(outcome.disabled_ok.len(), 1);
    assert_eq!(outcome.disabled_ok[0].id, "SonarCSharp_S300");
    assert!(outcome.has_failures());

    let dir = tempfile::tempdir().unwrap();
    let meta = ReportMeta {
        coding_standard: "Imported Sonar Rules".to_string(),
        organization: "acme".to_string(),
    };
    let paths = ReportWriter::new(dir.path())
        .write(&outcome, &reconciliation.skipped, &meta, chrono::Local::now())
        .unwrap();

    let skipped: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.skipped).unwrap()).unwrap();
    // S200 had no remote pattern; S100's enable call failed. Both enumerated.
    assert_eq!(skipped["summary"]["total"], 2);

    let failure_exit = ImporterError::PartialSync {
        failed: outcome.failure_count(),
        total: outcome.total_count(),
    };
    assert!(failure_exit.to_string().contains("1 of 2"));
}

#[tokio::test]
async fn standard_names_are_made_unique_by_appending_a_counter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations/gh/acme/coding-standards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "name": "Imported Sonar Rules"},
                {"id": 2, "name": "Imported Sonar Rules (1)"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let name = client
        .unique_standard_name("acme", "Imported Sonar Rules")
        .await;
    assert_eq!(name, "Imported Sonar Rules (2)");
}
