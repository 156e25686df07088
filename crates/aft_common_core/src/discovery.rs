//! Account discovery and filtering.
//!
//! Resolves OU names under the organization root, enumerates the accounts
//! directly inside those OUs, and narrows managed accounts by tag.

use crate::directory::managed_account_ids;
use crate::error::{log_failure, AftError, AftResult};
use crate::model::{ChildType, TagFilter, TagSet, ROOT_NAME};
use crate::pagination::collect_pages;
use crate::providers::{DirectoryProvider, RegistryProvider, TagProvider};

/// Identifier of the root literally named `Root`.
///
/// Any other roots are ignored. If none carries that name the organization
/// layout is not what the pipeline expects and this fails with a
/// configuration error.
pub fn root_id(directory: &impl DirectoryProvider) -> AftResult<String> {
    let roots = collect_pages(|token| directory.list_roots(token))
        .inspect_err(log_failure("ou_resolver"))?;

    let root = roots
        .into_iter()
        .find(|root| root.name == ROOT_NAME)
        .ok_or_else(|| AftError::configuration(format!("Root called '{ROOT_NAME}' was not found")))
        .inspect_err(log_failure("ou_resolver"))?;

    tracing::info!(root_id = %root.id, "resolved organization root");
    Ok(root.id)
}

/// Identifier of the OU named `ou_name` directly under the root, or `None`.
///
/// Names compare exactly (case-sensitive). Sibling OUs sharing a name are not
/// detected; the first one listed wins.
pub fn resolve_ou_id(
    directory: &impl DirectoryProvider,
    ou_name: &str,
) -> AftResult<Option<String>> {
    let root_id = root_id(directory)?;
    let ous = collect_pages(|token| directory.list_organizational_units_for_parent(&root_id, token))
        .inspect_err(log_failure("ou_resolver"))?;

    let ou_id = ous.into_iter().find(|ou| ou.name == ou_name).map(|ou| ou.id);
    match &ou_id {
        Some(id) => tracing::info!(ou_name, ou_id = %id, "resolved OU"),
        None => tracing::info!(ou_name, root_id = %root_id, "no OU with this name under root"),
    }
    Ok(ou_id)
}

/// Accounts that are direct children of the named OUs.
///
/// Every name is resolved first, then each resolved OU is listed in input
/// order. Names that do not resolve are skipped with a warning. Duplicate names
/// are processed independently, so the result may repeat identifiers. An empty
/// result means no OU yielded any account.
pub fn account_ids_in_ous(
    directory: &impl DirectoryProvider,
    ou_names: &[String],
) -> AftResult<Vec<String>> {
    tracing::info!(?ou_names, "getting account ids in OUs");

    let mut resolved = Vec::with_capacity(ou_names.len());
    for name in ou_names {
        resolved.push((name.as_str(), resolve_ou_id(directory, name)?));
    }

    let mut account_ids = Vec::new();
    for (name, ou_id) in resolved {
        let Some(ou_id) = ou_id else {
            tracing::warn!(ou_name = name, "OU was not found, skipping");
            continue;
        };

        let children =
            collect_pages(|token| directory.list_children(&ou_id, ChildType::Account, token))
                .inspect_err(log_failure("account_enumerator"))?;
        tracing::info!(ou_id = %ou_id, accounts = children.len(), "listed accounts in OU");
        account_ids.extend(children.into_iter().map(|child| child.id));
    }

    if account_ids.is_empty() {
        tracing::info!(?ou_names, "no accounts found in OUs");
    } else {
        tracing::info!(?account_ids, "account ids in OUs");
    }
    Ok(account_ids)
}

/// Whether `tags` carries every pair in `filter` with an exactly equal value.
///
/// A filter with no pairs matches nothing.
pub fn tags_satisfy(tags: &TagSet, filter: &TagFilter) -> bool {
    let required = filter.required_pairs();
    let satisfied = filter
        .pairs()
        .filter(|(key, value)| tags.get(key) == Some(*value))
        .count();
    required > 0 && satisfied == required
}

/// Candidate accounts whose tags satisfy every pair in `filter`.
///
/// Tags are fetched once per candidate, sequentially, in candidate order. A
/// failed lookup aborts the whole match; partial results are never returned.
/// Nothing is looked up when there are no candidates or the filter is empty.
pub fn accounts_matching_tags(
    tags: &impl TagProvider,
    candidate_ids: &[String],
    filter: &TagFilter,
) -> AftResult<Vec<String>> {
    tracing::info!(?filter, candidates = candidate_ids.len(), "getting accounts with tags");

    if filter.required_pairs() == 0 {
        tracing::info!("tag filter is empty, no account can match");
        return Ok(Vec::new());
    }

    let mut matched = Vec::new();
    for account_id in candidate_ids {
        let account_tags: TagSet = tags
            .list_tags_for_resource(account_id)
            .inspect_err(log_failure("tag_matcher"))?
            .into();
        tracing::debug!(account_id = %account_id, tags = ?account_tags, "fetched account tags");

        if tags_satisfy(&account_tags, filter) {
            tracing::info!(account_id = %account_id, "account matched tag filter");
            matched.push(account_id.clone());
        }
    }

    if matched.is_empty() {
        tracing::info!(?filter, "no accounts matched tag filter");
    }
    Ok(matched)
}

/// Managed accounts from the registry whose tags satisfy `filter`.
///
/// The registry is scanned in full before any tag lookup. An empty filter
/// still scans the registry but looks up no tags.
pub fn managed_accounts_matching_tags(
    registry: &impl RegistryProvider,
    tags: &impl TagProvider,
    filter: &TagFilter,
) -> AftResult<Vec<String>> {
    let candidates = managed_account_ids(registry)?;
    accounts_matching_tags(tags, &candidates, filter)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::model::Tag;

    use super::*;

    fn tag_set(pairs: &[(&str, &str)]) -> TagSet {
        pairs
            .iter()
            .map(|(key, value)| Tag::new(*key, *value))
            .collect()
    }

    #[test]
    fn multi_key_entries_require_every_key() {
        let filter = TagFilter::new(vec![BTreeMap::from([
            ("env".to_string(), "prod".to_string()),
            ("team".to_string(), "core".to_string()),
        ])]);

        assert!(tags_satisfy(
            &tag_set(&[("env", "prod"), ("team", "core"), ("extra", "x")]),
            &filter
        ));
        assert!(!tags_satisfy(&tag_set(&[("env", "prod")]), &filter));
    }

    #[test]
    fn values_compare_exactly() {
        let filter = TagFilter::from_pairs([("env", "prod")]);
        assert!(!tags_satisfy(&tag_set(&[("env", "Prod")]), &filter));
        assert!(!tags_satisfy(&tag_set(&[("env", "production")]), &filter));
        assert!(!tags_satisfy(&tag_set(&[("Env", "prod")]), &filter));
    }

    #[test]
    fn conflicting_entries_never_match() {
        let filter = TagFilter::from_pairs([("env", "prod"), ("env", "dev")]);
        assert!(!tags_satisfy(&tag_set(&[("env", "prod")]), &filter));
    }

    #[test]
    fn empty_filter_matches_nothing() {
        assert!(!tags_satisfy(&tag_set(&[("env", "prod")]), &TagFilter::default()));
    }
}
