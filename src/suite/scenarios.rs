// src/suite/scenarios.rs
use futures::FutureExt;

use crate::api::{DogApi, Endpoint};
use crate::assert::expect;
use crate::errors::Result;
use crate::suite::Scenario;

const FACTS: &str = "GET /facts";
const BREEDS: &str = "GET /breeds";
const GROUPS: &str = "GET /groups";

const MISSING_ID: &str = "non-existent-id";

pub fn registry() -> Vec<Scenario> {
    vec![
        Scenario::new(FACTS, "200 OK - should get a list of 3 facts", |api| {
            facts_list_of_three(api).boxed()
        }),
        Scenario::new(BREEDS, "200 OK - should get a paginated list of breeds", |api| {
            breeds_paginated_list(api).boxed()
        }),
        Scenario::new(BREEDS, "200 OK - should default to the first page", |api| {
            breeds_default_page(api).boxed()
        }),
        Scenario::new(BREEDS, "200 OK - should get a single breed by ID", |api| {
            breed_by_id(api).boxed()
        }),
        Scenario::new(BREEDS, "200 OK - should answer a repeated page identically", |api| {
            breeds_page_is_repeatable(api).boxed()
        }),
        Scenario::new(BREEDS, "404 Not Found - should fail for a non-existent breed", |api| {
            breed_not_found(api).boxed()
        }),
        Scenario::new(GROUPS, "200 OK - should get a list of groups", |api| {
            groups_list(api).boxed()
        }),
        Scenario::new(GROUPS, "200 OK - should get a single group by ID", |api| {
            group_by_id(api).boxed()
        }),
        Scenario::new(GROUPS, "404 Not Found - should fail for a non-existent group", |api| {
            group_not_found(api).boxed()
        }),
    ]
}

// ================== /facts ==================

pub async fn facts_list_of_three(api: DogApi) -> Result<()> {
    let resp = api.list_facts(Some(3)).await?;

    let check = expect(&resp);
    check.ok()?.status(200)?;
    check
        .json()?
        .is_array("/data", true)?
        .has_len("/data", 3)?
        .every_equals("/data", "/type", "fact")?
        .every_defined("/data", "/attributes/body")?;
    Ok(())
}

// ================== /breeds ==================

pub async fn breeds_paginated_list(api: DogApi) -> Result<()> {
    let resp = api.list_breeds(Some(1), Some(10)).await?;

    let check = expect(&resp);
    check.ok()?.status(200)?;

    // params follow the path in links.self, so only the prefix is fixed
    let breeds_url = api.context().url_for(&Endpoint::Breeds.path())?;
    check
        .json()?
        .is_array("/data", true)?
        .has_len("/data", 10)?
        .every_equals("/data", "/type", "breed")?
        .defined("/data/0/attributes/name")?
        .contains_str("/links/self", breeds_url.as_str())?
        .equals("/meta/pagination/current", 1)?;
    Ok(())
}

pub async fn breeds_default_page(api: DogApi) -> Result<()> {
    let resp = api.list_breeds(None, None).await?;

    let check = expect(&resp);
    check.ok()?.status(200)?;
    check
        .json()?
        .is_array("/data", true)?
        .len_greater_than("/data", 0)?
        .equals("/meta/pagination/current", 1)?;
    Ok(())
}

pub async fn breed_by_id(api: DogApi) -> Result<()> {
    // ids are server-assigned, so discover one first
    let listed = api.list_breeds(Some(1), Some(1)).await?;
    let pre = expect(&listed);
    pre.that(listed.ok(), || "failed to get breed list first".to_string())?;
    let list = pre.envelope()?;
    let first = list
        .data
        .resources()
        .first()
        .ok_or_else(|| pre.fail("breed list is empty"))?;

    let resp = api.get_breed(&first.id).await?;

    let check = expect(&resp);
    check.ok()?.status(200)?;
    check
        .json()?
        .is_array("/data", false)?
        .equals("/data/id", first.id.as_str())?
        .equals("/data/type", "breed")?;

    let breed = check.envelope()?;
    let fetched = breed.data.resources().first().and_then(|r| r.attributes.name.as_deref());
    check.equals("attributes.name", fetched, first.attributes.name.as_deref())?;
    Ok(())
}

pub async fn breeds_page_is_repeatable(api: DogApi) -> Result<()> {
    let first = api.list_breeds(Some(2), Some(5)).await?;
    let pre = expect(&first);
    pre.ok()?.status(200)?;
    let first_len = pre.json()?.array_at("/data")?.len();

    let resp = api.list_breeds(Some(2), Some(5)).await?;

    let check = expect(&resp);
    check.equals("status", resp.status(), first.status())?;
    check
        .json()?
        .is_array("/data", true)?
        .has_len("/data", first_len)?
        .equals("/meta/pagination/current", 2)?;
    Ok(())
}

pub async fn breed_not_found(api: DogApi) -> Result<()> {
    let resp = api.get_breed(MISSING_ID).await?;

    expect(&resp).not_ok()?.status(404)?;
    Ok(())
}

// ================== /groups ==================

pub async fn groups_list(api: DogApi) -> Result<()> {
    let resp = api.list_groups(None, None).await?;

    let check = expect(&resp);
    check.ok()?.status(200)?;
    check
        .json()?
        .is_array("/data", true)?
        .len_greater_than("/data", 0)?
        .every_equals("/data", "/type", "group")?
        .defined("/data/0/attributes/name")?
        .every_defined("/data", "/relationships/breeds")?;
    Ok(())
}

pub async fn group_by_id(api: DogApi) -> Result<()> {
    let listed = api.list_groups(Some(1), Some(1)).await?;
    let pre = expect(&listed);
    pre.that(listed.ok(), || "failed to get group list first".to_string())?;
    let list = pre.envelope()?;
    let first = list
        .data
        .resources()
        .first()
        .ok_or_else(|| pre.fail("group list is empty"))?;

    let resp = api.get_group(&first.id).await?;

    let check = expect(&resp);
    check.ok()?.status(200)?;
    check
        .json()?
        .is_array("/data", false)?
        .equals("/data/id", first.id.as_str())?
        .equals("/data/type", "group")?
        .defined("/data/relationships/breeds")?;
    Ok(())
}

pub async fn group_not_found(api: DogApi) -> Result<()> {
    let resp = api.get_group(MISSING_ID).await?;

    expect(&resp).not_ok()?.status(404)?;
    Ok(())
}
