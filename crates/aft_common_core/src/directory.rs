//! Account and OU lookups built on the directory and registry providers.

use crate::discovery::root_id;
use crate::error::{log_failure, AftError, AftResult};
use crate::model::{AccountRecord, ParentType};
use crate::pagination::collect_pages;
use crate::providers::{DirectoryProvider, RegistryProvider};

/// Names of the OUs directly under the root named `Root`.
pub fn root_ou_names(directory: &impl DirectoryProvider) -> AftResult<Vec<String>> {
    let root_id = root_id(directory)?;
    tracing::info!(root_id = %root_id, "listing OUs for root");

    let names: Vec<String> =
        collect_pages(|token| directory.list_organizational_units_for_parent(&root_id, token))
            .inspect_err(log_failure("directory"))?
            .into_iter()
            .map(|ou| ou.name)
            .collect();

    tracing::info!(?names, "OU names");
    Ok(names)
}

/// Describes one account together with its first parent.
///
/// `org_name` is the parent OU's name, or empty when the account sits
/// directly under a root.
pub fn account_record(
    directory: &impl DirectoryProvider,
    account_id: &str,
) -> AftResult<AccountRecord> {
    tracing::info!(account_id, "getting account details");

    let account = directory
        .describe_account(account_id)
        .inspect_err(log_failure("directory"))?;
    let parents = collect_pages(|token| directory.list_parents(&account.id, token))
        .inspect_err(log_failure("directory"))?;
    let parent = parents
        .into_iter()
        .next()
        .ok_or_else(|| {
            AftError::remote(
                "directory",
                "ListParents",
                format!("account {} has no parent", account.id),
            )
        })
        .inspect_err(log_failure("directory"))?;

    let org_name = match parent.parent_type {
        ParentType::OrganizationalUnit => {
            directory
                .describe_organizational_unit(&parent.id)
                .inspect_err(log_failure("directory"))?
                .name
        }
        ParentType::Root => String::new(),
    };

    Ok(AccountRecord::new(&account, &parent, org_name))
}

/// Every member account in the organization, described one at a time.
pub fn list_account_records(directory: &impl DirectoryProvider) -> AftResult<Vec<AccountRecord>> {
    let accounts = collect_pages(|token| directory.list_accounts(token))
        .inspect_err(log_failure("directory"))?;

    accounts
        .iter()
        .map(|account| account_record(directory, &account.id))
        .collect()
}

pub fn find_account_by_email(
    directory: &impl DirectoryProvider,
    email: &str,
) -> AftResult<Option<AccountRecord>> {
    let record = list_account_records(directory)?
        .into_iter()
        .find(|record| record.email == email);

    if record.is_none() {
        tracing::info!(email, "no account with this email");
    }
    Ok(record)
}

pub fn account_emails(directory: &impl DirectoryProvider) -> AftResult<Vec<String>> {
    Ok(list_account_records(directory)?
        .into_iter()
        .map(|record| record.email)
        .collect())
}

pub fn account_names(directory: &impl DirectoryProvider) -> AftResult<Vec<String>> {
    Ok(list_account_records(directory)?
        .into_iter()
        .map(|record| record.name)
        .collect())
}

pub fn account_email_for_id(
    directory: &impl DirectoryProvider,
    account_id: &str,
) -> AftResult<Option<String>> {
    tracing::info!(account_id, "getting account email");
    let email = list_account_records(directory)?
        .into_iter()
        .find(|record| record.id == account_id)
        .map(|record| record.email);

    if let Some(email) = &email {
        tracing::info!(account_id, email = %email, "account email");
    }
    Ok(email)
}

/// Every account identifier in the managed-account registry.
///
/// An empty result means the registry holds no accounts.
pub fn managed_account_ids(registry: &impl RegistryProvider) -> AftResult<Vec<String>> {
    let ids = collect_pages(|key| registry.scan_account_ids(key))
        .inspect_err(log_failure("registry"))?;

    if ids.is_empty() {
        tracing::info!("registry holds no managed accounts");
    }
    Ok(ids)
}
