use crate::error::{log_failure, AftResult};
use crate::model::{Tag, TagSet};
use crate::providers::TagProvider;

/// Applies `tags` to an organization resource.
///
/// With `rollback` set, the current tags are captured first and restored
/// after the write, so the call only proves the tags can be applied.
pub fn tag_account(
    provider: &impl TagProvider,
    resource_id: &str,
    tags: &[Tag],
    rollback: bool,
) -> AftResult<()> {
    let snapshot: Option<TagSet> = if rollback {
        Some(
            provider
                .list_tags_for_resource(resource_id)
                .inspect_err(log_failure("tagging"))?
                .into(),
        )
    } else {
        None
    };

    provider
        .tag_resource(resource_id, tags)
        .inspect_err(log_failure("tagging"))?;
    tracing::info!(resource_id, ?tags, "tagged resource");

    if let Some(snapshot) = snapshot {
        let applied_keys: Vec<String> = tags.iter().map(|tag| tag.key.clone()).collect();
        provider
            .untag_resource(resource_id, &applied_keys)
            .inspect_err(log_failure("tagging"))?;
        if !snapshot.is_empty() {
            provider
                .tag_resource(resource_id, &snapshot.to_tags())
                .inspect_err(log_failure("tagging"))?;
        }
        tracing::info!(resource_id, restored = snapshot.len(), "rolled back resource tags");
    }

    Ok(())
}
