mod support;

use aft_common_core::discovery::{resolve_ou_id, root_id};
use aft_common_core::model::Root;
use aft_common_core::test_helpers::{InMemoryOrganization, TEST_ROOT_ID};
use support::organization::{sample_organization, sample_organization_with_page_size, SANDBOX_OU};

#[test]
fn resolves_ou_directly_under_root() {
    let org = sample_organization();
    let ou_id = resolve_ou_id(&org, "Sandbox").expect("resolution should succeed");
    assert_eq!(ou_id.as_deref(), Some(SANDBOX_OU));
}

#[test]
fn unknown_name_resolves_to_none() {
    let org = sample_organization();
    let ou_id = resolve_ou_id(&org, "Marketing").expect("resolution should succeed");
    assert_eq!(ou_id, None);
}

#[test]
fn names_compare_case_sensitively() {
    let org = sample_organization();
    assert_eq!(resolve_ou_id(&org, "sandbox").expect("resolution should succeed"), None);
}

#[test]
fn grandchild_ous_are_not_resolved() {
    let org = sample_organization();
    assert_eq!(resolve_ou_id(&org, "Workloads").expect("resolution should succeed"), None);
}

#[test]
fn ou_listing_is_fully_paginated() {
    let org = sample_organization_with_page_size(1);
    let ou_id = resolve_ou_id(&org, "Production").expect("resolution should succeed");

    assert_eq!(ou_id.as_deref(), Some("ou-a1b2-production"));
    assert_eq!(org.call_count("ListOrganizationalUnitsForParent"), 2);
}

#[test]
fn uses_only_the_root_named_root() {
    let org = InMemoryOrganization::with_roots(vec![
        Root {
            id: "r-other".to_string(),
            name: "Legacy".to_string(),
        },
        Root {
            id: TEST_ROOT_ID.to_string(),
            name: "Root".to_string(),
        },
    ])
    .page_size(1)
    .ou("r-other", "ou-legacy-sandbox", "Sandbox")
    .ou(TEST_ROOT_ID, "ou-main-sandbox", "Sandbox");

    assert_eq!(root_id(&org).expect("root should resolve"), TEST_ROOT_ID);
    assert_eq!(
        resolve_ou_id(&org, "Sandbox").expect("resolution should succeed").as_deref(),
        Some("ou-main-sandbox")
    );
}

#[test]
fn missing_root_fails_before_listing_ous() {
    let org = InMemoryOrganization::with_roots(vec![Root {
        id: "r-other".to_string(),
        name: "Legacy".to_string(),
    }])
    .ou("r-other", "ou-legacy-sandbox", "Sandbox");

    let error = resolve_ou_id(&org, "Sandbox").expect_err("missing root should fail");

    assert_eq!(error.kind(), "configuration");
    assert!(error.to_string().contains("Root called 'Root' was not found"));
    assert_eq!(org.call_count("ListOrganizationalUnitsForParent"), 0);
}

#[test]
fn directory_failure_propagates() {
    let org = sample_organization().failing("ListRoots");
    let error = resolve_ou_id(&org, "Sandbox").expect_err("listing failure should propagate");
    assert_eq!(error.operation(), Some("ListRoots"));
}
