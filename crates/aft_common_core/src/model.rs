use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ROOT_NAME: &str = "Root";
pub const ACCOUNT_VENDOR: &str = "aws";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Pending,
    Active,
    Suspended,
    PendingClosure,
    Closed,
}

impl AccountStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::PendingClosure => "PENDING_CLOSURE",
            Self::Closed => "CLOSED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "ACTIVE" => Some(Self::Active),
            "SUSPENDED" => Some(Self::Suspended),
            "PENDING_CLOSURE" => Some(Self::PendingClosure),
            "CLOSED" => Some(Self::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinedMethod {
    Invited,
    Created,
}

impl JoinedMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invited => "INVITED",
            Self::Created => "CREATED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INVITED" => Some(Self::Invited),
            "CREATED" => Some(Self::Created),
            _ => None,
        }
    }
}

/// A member account as reported by the directory. Never cached across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub arn: String,
    pub email: String,
    pub name: String,
    pub status: AccountStatus,
    pub joined_method: JoinedMethod,
    pub joined_timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    pub id: String,
    pub name: String,
}

/// OU names are only unique among siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationalUnit {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParentType {
    Root,
    OrganizationalUnit,
}

impl ParentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::OrganizationalUnit => "ORGANIZATIONAL_UNIT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    pub id: String,
    pub parent_type: ParentType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChildType {
    Account,
    OrganizationalUnit,
}

impl ChildType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Account => "ACCOUNT",
            Self::OrganizationalUnit => "ORGANIZATIONAL_UNIT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub child_type: ChildType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Tag key to value. Keys are unique; a later duplicate in the source list wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeMap<String, String>);

impl TagSet {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn to_tags(&self) -> Vec<Tag> {
        self.0
            .iter()
            .map(|(key, value)| Tag::new(key, value))
            .collect()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().map(|tag| (tag.key, tag.value)).collect())
    }
}

impl From<Vec<Tag>> for TagSet {
    fn from(tags: Vec<Tag>) -> Self {
        tags.into_iter().collect()
    }
}

/// One filter entry: every key must be present with exactly this value.
pub type TagFilterEntry = BTreeMap<String, String>;

/// Ordered, conjunctive tag filter.
///
/// Serializes as a list of objects, e.g. `[{"env":"prod"},{"team":"core"}]`.
/// Entries are ANDed, and keys within an entry are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagFilter(Vec<TagFilterEntry>);

impl TagFilter {
    pub fn new(entries: Vec<TagFilterEntry>) -> Self {
        Self(entries)
    }

    /// Builds a filter with one single-pair entry per `(key, value)`.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| BTreeMap::from([(key.into(), value.into())]))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[TagFilterEntry] {
        &self.0
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|entry| entry.iter())
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn required_pairs(&self) -> usize {
        self.0.iter().map(BTreeMap::len).sum()
    }
}

/// Flattened account description handed to downstream provisioning steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub email: String,
    pub name: String,
    pub method: String,
    pub joined_date: String,
    pub status: String,
    pub parent_id: String,
    pub parent_type: String,
    pub org_name: String,
    pub vendor: String,
}

impl AccountRecord {
    pub fn new(account: &Account, parent: &Parent, org_name: impl Into<String>) -> Self {
        Self {
            id: account.id.clone(),
            record_type: "account".to_string(),
            email: account.email.clone(),
            name: account.name.clone(),
            method: account.joined_method.as_str().to_string(),
            joined_date: account
                .joined_timestamp
                .map(|timestamp| timestamp.to_rfc3339())
                .unwrap_or_default(),
            status: account.status.as_str().to_string(),
            parent_id: parent.id.clone(),
            parent_type: parent.parent_type.as_str().to_string(),
            org_name: org_name.into(),
            vendor: ACCOUNT_VENDOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn tag_filter_deserializes_from_list_of_objects() {
        let filter: TagFilter = serde_json::from_value(json!([
            {"env": "prod"},
            {"team": "core", "tier": "1"}
        ]))
        .expect("filter should parse");

        assert_eq!(filter.entries().len(), 2);
        assert_eq!(filter.required_pairs(), 3);
    }

    #[test]
    fn tag_set_keeps_last_duplicate_key() {
        let tags: TagSet = vec![Tag::new("env", "dev"), Tag::new("env", "prod")].into();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("env"), Some("prod"));
    }

    #[test]
    fn account_record_serializes_with_type_field() {
        let account = Account {
            id: "111111111111".to_string(),
            arn: "arn:aws:organizations::000000000000:account/o-abc/111111111111".to_string(),
            email: "dev@example.com".to_string(),
            name: "dev".to_string(),
            status: AccountStatus::Active,
            joined_method: JoinedMethod::Created,
            joined_timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single(),
        };
        let parent = Parent {
            id: "ou-abcd-1234".to_string(),
            parent_type: ParentType::OrganizationalUnit,
        };

        let record = AccountRecord::new(&account, &parent, "Sandbox");
        let value = serde_json::to_value(&record).expect("record should serialize");

        assert_eq!(value["type"], "account");
        assert_eq!(value["method"], "CREATED");
        assert_eq!(value["parent_type"], "ORGANIZATIONAL_UNIT");
        assert_eq!(value["joined_date"], "2024-03-01T12:00:00+00:00");
        assert_eq!(value["vendor"], "aws");
    }
}
