//! Service Catalog decisions for the Account Factory product.

use serde::{Deserialize, Serialize};

use crate::error::AftResult;

pub const IN_PROGRESS_STATUSES: [&str; 2] = ["UNDER_CHANGE", "PLAN_IN_PROGRESS"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedProduct {
    pub id: String,
    pub product_id: String,
    pub status: String,
}

/// Whether any provisioned instance of `product_id` is still changing.
pub fn provisioning_in_progress(products: &[ProvisionedProduct], product_id: &str) -> bool {
    for product in products.iter().filter(|product| product.product_id == product_id) {
        tracing::info!(provisioned_product_id = %product.id, "identified Control Tower product");
        if IN_PROGRESS_STATUSES.contains(&product.status.as_str()) {
            tracing::info!(status = %product.status, "product provisioning in progress");
            return true;
        }
    }

    tracing::info!("no product provisioning in progress");
    false
}

/// First artifact for which `is_active` returns true.
///
/// `is_active` should report a missing artifact as inactive rather than fail.
pub fn first_active_artifact<F>(
    artifact_ids: &[String],
    mut is_active: F,
) -> AftResult<Option<String>>
where
    F: FnMut(&str) -> AftResult<bool>,
{
    for artifact_id in artifact_ids {
        if is_active(artifact_id)? {
            tracing::info!(artifact_id = %artifact_id, "using provisioning artifact");
            return Ok(Some(artifact_id.clone()));
        }
    }
    Ok(None)
}
