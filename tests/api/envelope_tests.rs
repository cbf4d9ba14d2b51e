use dogapi_suite::api::model::{Linkage, ResourceType};
use dogapi_suite::errors::FailureKind;
use dogapi_suite::http::Cardinality;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{api_for, start_fake, BREED_COUNT, GROUP_COUNT};

#[tokio::test]
async fn test_breed_page_envelope() {
    let server = start_fake().await;
    let resp = api_for(&server).list_breeds(Some(1), Some(10)).await.unwrap();

    let env = resp.envelope().unwrap();
    assert_eq!(env.data.cardinality(), Cardinality::Collection);

    let breeds = env.data.collection().unwrap();
    assert_eq!(breeds.len(), 10);
    assert!(breeds.iter().all(|b| b.kind == ResourceType::Breed));
    assert!(breeds[0].attributes.name.is_some());
    assert!(breeds[0].attributes.life.is_some());

    let page = env.pagination().unwrap();
    assert_eq!(page.current, 1);
    assert_eq!(page.next, Some(2));
    assert_eq!(page.records, BREED_COUNT as u64);

    let self_link = env.self_link().unwrap();
    assert!(self_link.starts_with(&format!("{}/api/v2/breeds", server.uri())));
}

#[tokio::test]
async fn test_last_page_has_no_next() {
    let server = start_fake().await;
    let env = api_for(&server)
        .list_breeds(Some(3), Some(10))
        .await
        .unwrap()
        .envelope()
        .unwrap();

    let page = env.pagination().unwrap();
    assert_eq!(page.current, 3);
    assert_eq!(page.last, Some(3));
    assert_eq!(page.next, None);
    assert_eq!(env.data.resources().len(), BREED_COUNT - 20);
}

#[tokio::test]
async fn test_group_relationships() {
    let server = start_fake().await;
    let env = api_for(&server)
        .list_groups(None, None)
        .await
        .unwrap()
        .envelope()
        .unwrap();

    let groups = env.data.resources();
    assert_eq!(groups.len(), GROUP_COUNT);
    for g in groups {
        let rel = g.relationship("breeds").unwrap();
        assert!(matches!(rel.data, Linkage::Many(_)));
        assert!(rel.data.refs().iter().all(|r| r.kind == ResourceType::Breed));
    }
}

#[tokio::test]
async fn test_single_breed_links_its_group() {
    let server = start_fake().await;
    let api = api_for(&server);
    let first = api.list_breeds(Some(1), Some(1)).await.unwrap().envelope().unwrap();
    let id = first.data.resources()[0].id.clone();

    let env = api.get_breed(&id).await.unwrap().envelope().unwrap();
    let breed = env.data.single().unwrap();
    let group = breed.relationship("group").unwrap();
    assert!(matches!(group.data, Linkage::One(_)));
    assert_eq!(group.data.refs()[0].kind, ResourceType::Group);
}

#[tokio::test]
async fn test_object_where_list_expected_is_shape_failure() {
    let server = start_fake().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/facts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": "f1", "type": "fact", "attributes": { "body": "x" } }
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    let err = api_for(&server)
        .list_facts(Some(1))
        .await
        .unwrap()
        .envelope()
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Assertion);
}

#[tokio::test]
async fn test_html_body_is_parse_failure() {
    let server = start_fake().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/breeds"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>maintenance</html>", "text/html"))
        .with_priority(1)
        .mount(&server)
        .await;

    let err = api_for(&server)
        .list_breeds(None, None)
        .await
        .unwrap()
        .envelope()
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Parse);
}
