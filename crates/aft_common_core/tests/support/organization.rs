#![allow(dead_code)]

use aft_common_core::test_helpers::{test_account, InMemoryOrganization, TEST_ROOT_ID};

pub const SANDBOX_OU: &str = "ou-a1b2-sandbox";
pub const PRODUCTION_OU: &str = "ou-a1b2-production";
pub const WORKLOADS_OU: &str = "ou-a1b2-workloads";

pub const MANAGEMENT_ACCOUNT: &str = "000000000000";
pub const DEV_ACCOUNT: &str = "111111111111";
pub const TEST_ACCOUNT: &str = "222222222222";
pub const PROD_ACCOUNT: &str = "333333333333";
pub const STAGING_ACCOUNT: &str = "444444444444";
pub const NESTED_ACCOUNT: &str = "555555555555";

/// Root
/// ├── management (account)
/// ├── Sandbox: dev, test
/// └── Production: prod, staging
///     └── Workloads: nested
pub fn sample_organization() -> InMemoryOrganization {
    sample_organization_with_page_size(100)
}

pub fn sample_organization_with_page_size(page_size: usize) -> InMemoryOrganization {
    InMemoryOrganization::new()
        .page_size(page_size)
        .account(TEST_ROOT_ID, test_account(MANAGEMENT_ACCOUNT, "management"))
        .ou(TEST_ROOT_ID, SANDBOX_OU, "Sandbox")
        .ou(TEST_ROOT_ID, PRODUCTION_OU, "Production")
        .ou(PRODUCTION_OU, WORKLOADS_OU, "Workloads")
        .account(SANDBOX_OU, test_account(DEV_ACCOUNT, "dev"))
        .account(SANDBOX_OU, test_account(TEST_ACCOUNT, "test"))
        .account(PRODUCTION_OU, test_account(PROD_ACCOUNT, "prod"))
        .account(PRODUCTION_OU, test_account(STAGING_ACCOUNT, "staging"))
        .account(WORKLOADS_OU, test_account(NESTED_ACCOUNT, "nested"))
        .tags(DEV_ACCOUNT, &[("env", "dev"), ("team", "core")])
        .tags(TEST_ACCOUNT, &[("env", "test"), ("team", "payments")])
        .tags(PROD_ACCOUNT, &[("env", "prod"), ("team", "core"), ("tier", "1")])
        .tags(STAGING_ACCOUNT, &[("env", "staging"), ("team", "core")])
        .tags(NESTED_ACCOUNT, &[("env", "Prod"), ("team", "core")])
}

pub fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
