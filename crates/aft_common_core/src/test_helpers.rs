//! In-memory providers for tests.
//!
//! [`InMemoryOrganization`] models a small organization tree and records every
//! call it receives, so tests can assert what was (or was not) looked up.
//! Listings are served in pages of a configurable size; the continuation token
//! is the offset of the next item.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use crate::error::{AftError, AftResult};
use crate::model::{
    Account, AccountStatus, Child, ChildType, JoinedMethod, OrganizationalUnit, Parent,
    ParentType, Root, Tag,
};
use crate::pagination::Page;
use crate::providers::{DirectoryProvider, RegistryProvider, TagProvider};

pub const TEST_ROOT_ID: &str = "r-a1b2";

/// An active, created account with a derived email.
pub fn test_account(id: &str, name: &str) -> Account {
    Account {
        id: id.to_string(),
        arn: format!("arn:aws:organizations::000000000000:account/o-test/{id}"),
        email: format!("{name}@example.com"),
        name: name.to_string(),
        status: AccountStatus::Active,
        joined_method: JoinedMethod::Created,
        joined_timestamp: None,
    }
}

fn page_of<T: Clone>(items: &[T], token: Option<&str>, page_size: usize) -> AftResult<Page<T>> {
    let start = match token {
        None => 0,
        Some(token) => token
            .parse::<usize>()
            .map_err(|_| AftError::remote("test_directory", "Paginate", "invalid token"))?,
    };
    let end = (start + page_size.max(1)).min(items.len());
    let slice = items.get(start..end).unwrap_or_default().to_vec();
    if end < items.len() {
        Ok(Page::with_token(slice, end.to_string()))
    } else {
        Ok(Page::last(slice))
    }
}

#[derive(Debug)]
pub struct InMemoryOrganization {
    roots: Vec<Root>,
    ous: BTreeMap<String, Vec<OrganizationalUnit>>,
    children: BTreeMap<String, Vec<Child>>,
    accounts: Vec<Account>,
    parents: BTreeMap<String, Parent>,
    tags: Mutex<BTreeMap<String, Vec<Tag>>>,
    page_size: usize,
    failing: BTreeSet<String>,
    empty_first_pages: BTreeSet<String>,
    calls: Mutex<Vec<String>>,
}

impl Default for InMemoryOrganization {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrganization {
    /// An organization with a single root named `Root`.
    pub fn new() -> Self {
        Self::with_roots(vec![Root {
            id: TEST_ROOT_ID.to_string(),
            name: "Root".to_string(),
        }])
    }

    pub fn with_roots(roots: Vec<Root>) -> Self {
        Self {
            roots,
            ous: BTreeMap::new(),
            children: BTreeMap::new(),
            accounts: Vec::new(),
            parents: BTreeMap::new(),
            tags: Mutex::new(BTreeMap::new()),
            page_size: 100,
            failing: BTreeSet::new(),
            empty_first_pages: BTreeSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Adds an OU under `parent_id`.
    pub fn ou(mut self, parent_id: &str, ou_id: &str, name: &str) -> Self {
        let ou = OrganizationalUnit {
            id: ou_id.to_string(),
            name: name.to_string(),
        };
        self.ous.entry(parent_id.to_string()).or_default().push(ou);
        self.children
            .entry(parent_id.to_string())
            .or_default()
            .push(Child {
                id: ou_id.to_string(),
                child_type: ChildType::OrganizationalUnit,
            });
        let parent_type = if self.roots.iter().any(|root| root.id == parent_id) {
            ParentType::Root
        } else {
            ParentType::OrganizationalUnit
        };
        self.parents.insert(
            ou_id.to_string(),
            Parent {
                id: parent_id.to_string(),
                parent_type,
            },
        );
        self
    }

    /// Adds an account under `parent_id` (a root or OU identifier).
    pub fn account(mut self, parent_id: &str, account: Account) -> Self {
        self.children
            .entry(parent_id.to_string())
            .or_default()
            .push(Child {
                id: account.id.clone(),
                child_type: ChildType::Account,
            });
        let parent_type = if self.roots.iter().any(|root| root.id == parent_id) {
            ParentType::Root
        } else {
            ParentType::OrganizationalUnit
        };
        self.parents.insert(
            account.id.clone(),
            Parent {
                id: parent_id.to_string(),
                parent_type,
            },
        );
        self.accounts.push(account);
        self
    }

    pub fn tags(self, resource_id: &str, pairs: &[(&str, &str)]) -> Self {
        self.tags
            .lock()
            .expect("poisoned mutex")
            .insert(
                resource_id.to_string(),
                pairs.iter().map(|(key, value)| Tag::new(*key, *value)).collect(),
            );
        self
    }

    /// Makes every call to `operation` (e.g. `"ListChildren"`) fail.
    pub fn failing(mut self, operation: &str) -> Self {
        self.failing.insert(operation.to_string());
        self
    }

    /// Makes the first page of every `operation` listing empty but
    /// continued, the way Organizations sometimes answers.
    pub fn empty_first_page(mut self, operation: &str) -> Self {
        self.empty_first_pages.insert(operation.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.split(':').next() == Some(operation))
            .count()
    }

    pub fn current_tags(&self, resource_id: &str) -> Vec<Tag> {
        self.tags
            .lock()
            .expect("poisoned mutex")
            .get(resource_id)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, operation: &str, argument: &str) -> AftResult<()> {
        self.calls
            .lock()
            .expect("poisoned mutex")
            .push(format!("{operation}:{argument}"));
        if self.failing.contains(operation) {
            return Err(AftError::remote("test_directory", operation, "injected failure"));
        }
        Ok(())
    }
}

impl InMemoryOrganization {
    fn serve<T: Clone>(
        &self,
        operation: &str,
        items: &[T],
        next_token: Option<&str>,
    ) -> AftResult<Page<T>> {
        if next_token.is_none() && self.empty_first_pages.contains(operation) {
            return Ok(Page::with_token(Vec::new(), "0"));
        }
        page_of(items, next_token, self.page_size)
    }
}

impl DirectoryProvider for InMemoryOrganization {
    fn list_roots(&self, next_token: Option<&str>) -> AftResult<Page<Root>> {
        self.record("ListRoots", next_token.unwrap_or_default())?;
        self.serve("ListRoots", &self.roots, next_token)
    }

    fn list_organizational_units_for_parent(
        &self,
        parent_id: &str,
        next_token: Option<&str>,
    ) -> AftResult<Page<OrganizationalUnit>> {
        self.record("ListOrganizationalUnitsForParent", parent_id)?;
        let ous = self.ous.get(parent_id).cloned().unwrap_or_default();
        self.serve("ListOrganizationalUnitsForParent", &ous, next_token)
    }

    fn list_children(
        &self,
        parent_id: &str,
        child_type: ChildType,
        next_token: Option<&str>,
    ) -> AftResult<Page<Child>> {
        self.record("ListChildren", parent_id)?;
        let children: Vec<Child> = self
            .children
            .get(parent_id)
            .map(|children| {
                children
                    .iter()
                    .filter(|child| child.child_type == child_type)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        self.serve("ListChildren", &children, next_token)
    }

    fn list_accounts(&self, next_token: Option<&str>) -> AftResult<Page<Account>> {
        self.record("ListAccounts", next_token.unwrap_or_default())?;
        self.serve("ListAccounts", &self.accounts, next_token)
    }

    fn describe_account(&self, account_id: &str) -> AftResult<Account> {
        self.record("DescribeAccount", account_id)?;
        self.accounts
            .iter()
            .find(|account| account.id == account_id)
            .cloned()
            .ok_or_else(|| {
                AftError::remote("test_directory", "DescribeAccount", "AccountNotFoundException")
            })
    }

    fn list_parents(&self, child_id: &str, next_token: Option<&str>) -> AftResult<Page<Parent>> {
        self.record("ListParents", child_id)?;
        let parents: Vec<Parent> = self.parents.get(child_id).cloned().into_iter().collect();
        self.serve("ListParents", &parents, next_token)
    }

    fn describe_organizational_unit(&self, ou_id: &str) -> AftResult<OrganizationalUnit> {
        self.record("DescribeOrganizationalUnit", ou_id)?;
        self.ous
            .values()
            .flatten()
            .find(|ou| ou.id == ou_id)
            .cloned()
            .ok_or_else(|| {
                AftError::remote(
                    "test_directory",
                    "DescribeOrganizationalUnit",
                    "OrganizationalUnitNotFoundException",
                )
            })
    }
}

impl TagProvider for InMemoryOrganization {
    fn list_tags_for_resource(&self, resource_id: &str) -> AftResult<Vec<Tag>> {
        self.record("ListTagsForResource", resource_id)?;
        Ok(self.current_tags(resource_id))
    }

    fn tag_resource(&self, resource_id: &str, tags: &[Tag]) -> AftResult<()> {
        self.record("TagResource", resource_id)?;
        let mut store = self.tags.lock().expect("poisoned mutex");
        let existing = store.entry(resource_id.to_string()).or_default();
        for tag in tags {
            existing.retain(|current| current.key != tag.key);
            existing.push(tag.clone());
        }
        Ok(())
    }

    fn untag_resource(&self, resource_id: &str, keys: &[String]) -> AftResult<()> {
        self.record("UntagResource", resource_id)?;
        let mut store = self.tags.lock().expect("poisoned mutex");
        if let Some(existing) = store.get_mut(resource_id) {
            existing.retain(|tag| !keys.contains(&tag.key));
        }
        Ok(())
    }
}

/// Registry of managed account identifiers served in pages.
#[derive(Debug)]
pub struct InMemoryRegistry {
    account_ids: Vec<String>,
    page_size: usize,
    fail: bool,
    scans: Mutex<Vec<Option<String>>>,
}

impl InMemoryRegistry {
    pub fn new<I, S>(account_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            account_ids: account_ids.into_iter().map(Into::into).collect(),
            page_size: 100,
            fail: false,
            scans: Mutex::new(Vec::new()),
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Continuation keys received, in call order.
    pub fn scans(&self) -> Vec<Option<String>> {
        self.scans.lock().expect("poisoned mutex").clone()
    }
}

impl RegistryProvider for InMemoryRegistry {
    fn scan_account_ids(&self, continuation_key: Option<&str>) -> AftResult<Page<String>> {
        self.scans
            .lock()
            .expect("poisoned mutex")
            .push(continuation_key.map(str::to_string));
        if self.fail {
            return Err(AftError::remote("test_registry", "Scan", "injected failure"));
        }
        page_of(&self.account_ids, continuation_key, self.page_size)
    }
}
