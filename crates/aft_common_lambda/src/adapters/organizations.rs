use aft_common_core::error::{AftError, AftResult};
use aft_common_core::model::{
    Account, AccountStatus, Child, ChildType, JoinedMethod, OrganizationalUnit, Parent,
    ParentType, Root, Tag,
};
use aft_common_core::pagination::{collect_pages, Page};
use aft_common_core::providers::{DirectoryProvider, TagProvider};
use aws_sdk_organizations::error::DisplayErrorContext;
use aws_sdk_organizations::types as sdk;
use chrono::{DateTime, Utc};

use super::block_on;

const COMPONENT: &str = "organizations";

/// Directory and tag provider backed by AWS Organizations.
///
/// Build it from the Control Tower management account's config; member
/// accounts cannot read the organization.
#[derive(Debug, Clone)]
pub struct OrganizationsDirectory {
    client: aws_sdk_organizations::Client,
}

impl OrganizationsDirectory {
    pub fn new(client: aws_sdk_organizations::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_organizations::Client::new(config))
    }
}

fn sdk_error(operation: &str, error: impl std::error::Error) -> AftError {
    AftError::remote(COMPONENT, operation, DisplayErrorContext(error))
}

impl DirectoryProvider for OrganizationsDirectory {
    fn list_roots(&self, next_token: Option<&str>) -> AftResult<Page<Root>> {
        let output = block_on(
            self.client
                .list_roots()
                .set_next_token(next_token.map(str::to_string))
                .send(),
        )
        .map_err(|error| sdk_error("ListRoots", error))?;

        Ok(Page {
            items: output.roots().iter().map(root_from_sdk).collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    fn list_organizational_units_for_parent(
        &self,
        parent_id: &str,
        next_token: Option<&str>,
    ) -> AftResult<Page<OrganizationalUnit>> {
        let output = block_on(
            self.client
                .list_organizational_units_for_parent()
                .parent_id(parent_id)
                .set_next_token(next_token.map(str::to_string))
                .send(),
        )
        .map_err(|error| sdk_error("ListOrganizationalUnitsForParent", error))?;

        Ok(Page {
            items: output
                .organizational_units()
                .iter()
                .map(organizational_unit_from_sdk)
                .collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    fn list_children(
        &self,
        parent_id: &str,
        child_type: ChildType,
        next_token: Option<&str>,
    ) -> AftResult<Page<Child>> {
        let output = block_on(
            self.client
                .list_children()
                .parent_id(parent_id)
                .child_type(child_type_to_sdk(child_type))
                .set_next_token(next_token.map(str::to_string))
                .send(),
        )
        .map_err(|error| sdk_error("ListChildren", error))?;

        Ok(Page {
            items: output
                .children()
                .iter()
                .map(|child| Child {
                    id: child.id().unwrap_or_default().to_string(),
                    child_type,
                })
                .collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    fn list_accounts(&self, next_token: Option<&str>) -> AftResult<Page<Account>> {
        let output = block_on(
            self.client
                .list_accounts()
                .set_next_token(next_token.map(str::to_string))
                .send(),
        )
        .map_err(|error| sdk_error("ListAccounts", error))?;

        Ok(Page {
            items: output
                .accounts()
                .iter()
                .map(account_from_sdk)
                .collect::<AftResult<_>>()?,
            next_token: output.next_token().map(str::to_string),
        })
    }

    fn describe_account(&self, account_id: &str) -> AftResult<Account> {
        let output = block_on(self.client.describe_account().account_id(account_id).send())
            .map_err(|error| sdk_error("DescribeAccount", error))?;

        let account = output.account().ok_or_else(|| {
            AftError::remote(COMPONENT, "DescribeAccount", "response missing Account")
        })?;
        account_from_sdk(account)
    }

    fn list_parents(&self, child_id: &str, next_token: Option<&str>) -> AftResult<Page<Parent>> {
        let output = block_on(
            self.client
                .list_parents()
                .child_id(child_id)
                .set_next_token(next_token.map(str::to_string))
                .send(),
        )
        .map_err(|error| sdk_error("ListParents", error))?;

        Ok(Page {
            items: output
                .parents()
                .iter()
                .map(parent_from_sdk)
                .collect::<AftResult<_>>()?,
            next_token: output.next_token().map(str::to_string),
        })
    }

    fn describe_organizational_unit(&self, ou_id: &str) -> AftResult<OrganizationalUnit> {
        let output = block_on(
            self.client
                .describe_organizational_unit()
                .organizational_unit_id(ou_id)
                .send(),
        )
        .map_err(|error| sdk_error("DescribeOrganizationalUnit", error))?;

        output
            .organizational_unit()
            .map(organizational_unit_from_sdk)
            .ok_or_else(|| {
                AftError::remote(
                    COMPONENT,
                    "DescribeOrganizationalUnit",
                    "response missing OrganizationalUnit",
                )
            })
    }
}

impl TagProvider for OrganizationsDirectory {
    fn list_tags_for_resource(&self, resource_id: &str) -> AftResult<Vec<Tag>> {
        collect_pages(|token| {
            let output = block_on(
                self.client
                    .list_tags_for_resource()
                    .resource_id(resource_id)
                    .set_next_token(token.map(str::to_string))
                    .send(),
            )
            .map_err(|error| sdk_error("ListTagsForResource", error))?;

            Ok(Page {
                items: output
                    .tags()
                    .iter()
                    .map(|tag| Tag::new(tag.key(), tag.value()))
                    .collect(),
                next_token: output.next_token().map(str::to_string),
            })
        })
    }

    fn tag_resource(&self, resource_id: &str, tags: &[Tag]) -> AftResult<()> {
        let sdk_tags = tags
            .iter()
            .map(|tag| {
                sdk::Tag::builder()
                    .key(&tag.key)
                    .value(&tag.value)
                    .build()
                    .map_err(|error| sdk_error("TagResource", error))
            })
            .collect::<AftResult<Vec<_>>>()?;

        block_on(
            self.client
                .tag_resource()
                .resource_id(resource_id)
                .set_tags(Some(sdk_tags))
                .send(),
        )
        .map(|_| ())
        .map_err(|error| sdk_error("TagResource", error))
    }

    fn untag_resource(&self, resource_id: &str, keys: &[String]) -> AftResult<()> {
        block_on(
            self.client
                .untag_resource()
                .resource_id(resource_id)
                .set_tag_keys(Some(keys.to_vec()))
                .send(),
        )
        .map(|_| ())
        .map_err(|error| sdk_error("UntagResource", error))
    }
}

fn root_from_sdk(root: &sdk::Root) -> Root {
    Root {
        id: root.id().unwrap_or_default().to_string(),
        name: root.name().unwrap_or_default().to_string(),
    }
}

fn organizational_unit_from_sdk(ou: &sdk::OrganizationalUnit) -> OrganizationalUnit {
    OrganizationalUnit {
        id: ou.id().unwrap_or_default().to_string(),
        name: ou.name().unwrap_or_default().to_string(),
    }
}

fn child_type_to_sdk(child_type: ChildType) -> sdk::ChildType {
    match child_type {
        ChildType::Account => sdk::ChildType::Account,
        ChildType::OrganizationalUnit => sdk::ChildType::OrganizationalUnit,
    }
}

fn parent_from_sdk(parent: &sdk::Parent) -> AftResult<Parent> {
    let parent_type = match parent.r#type() {
        Some(sdk::ParentType::Root) => ParentType::Root,
        Some(sdk::ParentType::OrganizationalUnit) => ParentType::OrganizationalUnit,
        other => {
            return Err(AftError::remote(
                COMPONENT,
                "ListParents",
                format!("unsupported parent type: {other:?}"),
            ))
        }
    };

    Ok(Parent {
        id: parent.id().unwrap_or_default().to_string(),
        parent_type,
    })
}

/// Lifecycle state of an account. `State` wins over the deprecated `Status`,
/// which is only consulted when `State` is absent or unrecognized.
fn status_from_sdk(account: &sdk::Account) -> Option<AccountStatus> {
    let from_state = account.state().and_then(|state| match state {
        sdk::AccountState::PendingActivation => Some(AccountStatus::Pending),
        sdk::AccountState::Active => Some(AccountStatus::Active),
        sdk::AccountState::Suspended => Some(AccountStatus::Suspended),
        sdk::AccountState::PendingClosure => Some(AccountStatus::PendingClosure),
        sdk::AccountState::Closed => Some(AccountStatus::Closed),
        _ => None,
    });

    #[allow(deprecated)]
    let legacy_status = account.status().map(|status| status.as_str());
    from_state.or_else(|| legacy_status.and_then(AccountStatus::parse))
}

fn account_from_sdk(account: &sdk::Account) -> AftResult<Account> {
    let id = account.id().unwrap_or_default().to_string();
    let status = status_from_sdk(account).ok_or_else(|| {
        #[allow(deprecated)]
        let status_text = account.status().map(|status| status.as_str()).unwrap_or_default();
        let state_text = account.state().map(|state| state.as_str()).unwrap_or_default();
        AftError::remote(
            COMPONENT,
            "DescribeAccount",
            format!("account {id} has unsupported status '{status_text}' and state '{state_text}'"),
        )
    })?;
    let method_text = account
        .joined_method()
        .map(|method| method.as_str())
        .unwrap_or_default();
    let joined_method = JoinedMethod::parse(method_text).ok_or_else(|| {
        AftError::remote(
            COMPONENT,
            "DescribeAccount",
            format!("account {id} has unsupported joined method '{method_text}'"),
        )
    })?;

    Ok(Account {
        arn: account.arn().unwrap_or_default().to_string(),
        email: account.email().unwrap_or_default().to_string(),
        name: account.name().unwrap_or_default().to_string(),
        status,
        joined_method,
        joined_timestamp: account
            .joined_timestamp()
            .and_then(|timestamp| {
                DateTime::<Utc>::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
            }),
        id,
    })
}
