use dogapi_suite::config::SuiteConfig;
use dogapi_suite::suite::{self, SuiteRunner};

fn live_config() -> SuiteConfig {
    let mut cfg = SuiteConfig::resolve(None).expect("resolve config from env");
    cfg.retries = Some(1);
    cfg
}

async fn run_live(name: &str) {
    let scenarios = suite::all().into_iter().filter(|s| s.name == name).collect();
    let report = SuiteRunner::new(live_config()).run(scenarios).await;
    let outcome = report.outcome(name).expect("scenario exists");
    assert!(outcome.passed(), "{}", report.render());
}

#[tokio::test]
#[ignore]
async fn live_facts_list_of_three() {
    run_live("200 OK - should get a list of 3 facts").await;
}

#[tokio::test]
#[ignore]
async fn live_breeds_paginated_list() {
    run_live("200 OK - should get a paginated list of breeds").await;
}

#[tokio::test]
#[ignore]
async fn live_breed_by_id() {
    run_live("200 OK - should get a single breed by ID").await;
}

#[tokio::test]
#[ignore]
async fn live_breed_not_found() {
    run_live("404 Not Found - should fail for a non-existent breed").await;
}

#[tokio::test]
#[ignore]
async fn live_groups_list() {
    run_live("200 OK - should get a list of groups").await;
}

#[tokio::test]
#[ignore]
async fn live_group_not_found() {
    run_live("404 Not Found - should fail for a non-existent group").await;
}

#[tokio::test]
#[ignore]
async fn live_full_suite() {
    let report = SuiteRunner::new(live_config()).run(suite::all()).await;
    assert!(report.success(), "{}", report.render());
}
