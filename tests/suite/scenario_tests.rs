use dogapi_suite::config::SuiteConfig;
use dogapi_suite::errors::FailureKind;
use dogapi_suite::suite::{self, scenarios, Failure, SuiteRunner, Verdict};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{api_for, config_for, mount_fake, start_fake, FakeDogApi};

const FACTS_SCENARIO: &str = "200 OK - should get a list of 3 facts";

#[tokio::test]
async fn test_every_scenario_passes_against_fake() {
    let server = start_fake().await;
    let report = SuiteRunner::new(config_for(&server)).run(suite::all()).await;

    for o in &report.outcomes {
        assert!(o.passed(), "{} failed: {:?}", o.title(), o.failure());
        assert_eq!(o.attempts, 1);
    }
    assert_eq!(report.outcomes.len(), suite::all().len());
    assert!(report.success());
}

#[tokio::test]
async fn test_scenarios_can_be_awaited_directly() {
    let server = start_fake().await;
    scenarios::breed_by_id(api_for(&server)).await.unwrap();
    scenarios::group_not_found(api_for(&server)).await.unwrap();
    scenarios::breeds_paginated_list(api_for(&server)).await.unwrap();
}

#[tokio::test]
async fn test_short_fact_list_fails_only_that_scenario() {
    let server = MockServer::start().await;
    mount_fake(&server, FakeDogApi::new(server.uri()).with_facts(2)).await;

    let report = SuiteRunner::new(config_for(&server)).run(suite::all()).await;

    assert_eq!(report.failed(), 1);
    let failure = report.outcome(FACTS_SCENARIO).unwrap().failure().unwrap();
    assert_eq!(failure.kind, FailureKind::Assertion);
    assert_eq!(failure.status, Some(200));
    // the offending body travels with the failure
    assert!(failure.body.as_deref().unwrap().contains("Dog fact number 0."));
}

#[tokio::test]
async fn test_html_instead_of_json_is_parse_failure() {
    let server = start_fake().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/facts"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .with_priority(1)
        .mount(&server)
        .await;

    let err = scenarios::facts_list_of_three(api_for(&server)).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Parse);
}

#[tokio::test]
async fn test_found_breed_is_assertion_failure_for_not_found_scenario() {
    let server = start_fake().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/breeds/non-existent-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": "non-existent-id", "type": "breed", "attributes": {} }
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    let err = scenarios::breed_not_found(api_for(&server)).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Assertion);
}

#[tokio::test]
async fn test_empty_breed_list_fails_lookup_scenario() {
    let server = start_fake().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/breeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .with_priority(1)
        .mount(&server)
        .await;

    let err = scenarios::breed_by_id(api_for(&server)).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Assertion);
    assert!(err.to_string().contains("breed list is empty"));
}

#[tokio::test]
async fn test_unreachable_service_fails_everything_as_infrastructure() {
    let cfg = SuiteConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        retries: Some(0),
        connect_timeout_secs: 2,
        timeout_secs: 2,
        ..SuiteConfig::default()
    };

    let report = SuiteRunner::new(cfg).run(suite::all()).await;

    assert_eq!(report.failed(), report.outcomes.len());
    for o in &report.outcomes {
        assert_eq!(o.failure().unwrap().kind, FailureKind::Infrastructure, "{}", o.title());
    }
}

#[tokio::test]
async fn test_retry_recovers_flaky_scenario() {
    let server = start_fake().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/facts"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    let mut cfg = config_for(&server);
    cfg.retries = Some(1);
    let only_facts = suite::all()
        .into_iter()
        .filter(|s| s.name == FACTS_SCENARIO)
        .collect();

    let report = SuiteRunner::new(cfg).run(only_facts).await;

    let outcome = report.outcome(FACTS_SCENARIO).unwrap();
    assert_eq!(outcome.verdict, Verdict::Flaky);
    assert_eq!(outcome.attempts, 2);
    assert!(report.success());
}

#[tokio::test]
async fn test_error_status_on_repeatable_page_is_assertion_failure() {
    let server = start_fake().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/breeds"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "errors": [{ "status": "503", "title": "Service Unavailable" }]
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    let err = scenarios::breeds_page_is_repeatable(api_for(&server))
        .await
        .unwrap_err();
    let failure = Failure::from(&err);

    assert_eq!(failure.kind, FailureKind::Assertion);
    assert_eq!(failure.status, Some(503));
    assert!(failure.body.as_deref().unwrap().contains("Service Unavailable"));
}

#[tokio::test]
async fn test_object_breed_list_reports_status_and_body() {
    let server = start_fake().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/breeds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": "lonely", "type": "breed", "attributes": { "name": "Lonely" } }
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    let err = scenarios::breed_by_id(api_for(&server)).await.unwrap_err();
    let failure = Failure::from(&err);

    assert_eq!(failure.kind, FailureKind::Assertion);
    assert_eq!(failure.status, Some(200));
    assert!(failure.message.contains("expected collection, found object"));
    assert!(failure.body.as_deref().unwrap().contains("lonely"));
}
