//! Remote capabilities the core calls through.
//!
//! Production implementations live in `aft_common_lambda::adapters`; in-memory
//! doubles live in [`crate::test_helpers`]. All calls are synchronous and are
//! issued one at a time.

use crate::error::AftResult;
use crate::model::{Account, Child, ChildType, OrganizationalUnit, Parent, Root, Tag};
use crate::pagination::Page;

/// The organization directory: roots, OUs, and member accounts.
pub trait DirectoryProvider {
    fn list_roots(&self, next_token: Option<&str>) -> AftResult<Page<Root>>;

    fn list_organizational_units_for_parent(
        &self,
        parent_id: &str,
        next_token: Option<&str>,
    ) -> AftResult<Page<OrganizationalUnit>>;

    fn list_children(
        &self,
        parent_id: &str,
        child_type: ChildType,
        next_token: Option<&str>,
    ) -> AftResult<Page<Child>>;

    fn list_accounts(&self, next_token: Option<&str>) -> AftResult<Page<Account>>;

    fn describe_account(&self, account_id: &str) -> AftResult<Account>;

    fn list_parents(&self, child_id: &str, next_token: Option<&str>) -> AftResult<Page<Parent>>;

    fn describe_organizational_unit(&self, ou_id: &str) -> AftResult<OrganizationalUnit>;
}

pub trait TagProvider {
    /// Every tag on the resource, in provider order.
    fn list_tags_for_resource(&self, resource_id: &str) -> AftResult<Vec<Tag>>;

    fn tag_resource(&self, resource_id: &str, tags: &[Tag]) -> AftResult<()>;

    fn untag_resource(&self, resource_id: &str, keys: &[String]) -> AftResult<()>;
}

/// The pipeline's own record of managed accounts.
pub trait RegistryProvider {
    /// One page of managed account identifiers. `continuation_key` is the key
    /// returned by the previous page.
    fn scan_account_ids(&self, continuation_key: Option<&str>) -> AftResult<Page<String>>;
}
