use dogapi_suite::config::SuiteConfig;
use dogapi_suite::http::{Cardinality, Http, RequestDescriptor};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_execute_sends_default_and_extra_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/facts"))
        .and(header("accept", "application/json"))
        .and(header("x-suite", "dogapi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cfg = SuiteConfig {
        base_url: server.uri(),
        ..SuiteConfig::default()
    };
    cfg.extra_http_headers
        .insert("X-Suite".to_string(), "dogapi".to_string());

    let ctx = Http::from_config(&cfg).build().unwrap();
    let req = RequestDescriptor::get("/api/v2/facts", Cardinality::Collection);
    let resp = ctx.execute(&req).await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.cardinality(), Cardinality::Collection);
    assert_eq!(resp.json::<serde_json::Value>().unwrap()["data"], json!([]));
}

#[tokio::test]
async fn test_execute_skips_none_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/breeds"))
        .and(query_param("page[size]", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = Http::new(server.uri()).build().unwrap();
    let req = RequestDescriptor::get("/api/v2/breeds", Cardinality::Collection)
        .param("page[number]", None::<u32>)
        .param("page[size]", Some(4));
    let resp = ctx.execute(&req).await.unwrap();

    let pairs: Vec<(String, String)> = resp.url().query_pairs().into_owned().collect();
    assert_eq!(pairs, vec![("page[size]".to_string(), "4".to_string())]);
}

#[tokio::test]
async fn test_base_url_path_is_replaced_by_absolute_request_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = Http::new(format!("{}/ignored/prefix", server.uri()))
        .build()
        .unwrap();
    let req = RequestDescriptor::get("/api/v2/groups", Cardinality::Collection);
    assert_eq!(ctx.execute(&req).await.unwrap().status(), 200);
}

#[tokio::test]
async fn test_response_headers_are_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/facts"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "abc-123")
                .set_body_json(json!({ "data": [] })),
        )
        .mount(&server)
        .await;

    let ctx = Http::new(server.uri()).build().unwrap();
    let resp = ctx
        .execute(&RequestDescriptor::get("/api/v2/facts", Cardinality::Collection))
        .await
        .unwrap();
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "abc-123");
}
