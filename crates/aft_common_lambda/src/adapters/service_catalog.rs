use aft_common_core::error::{AftError, AftResult};
use aft_common_core::pagination::{collect_pages, Page};
use aft_common_core::provisioning::{
    first_active_artifact, provisioning_in_progress, ProvisionedProduct,
};
use aws_sdk_servicecatalog::config::http::HttpResponse;
use aws_sdk_servicecatalog::error::{DisplayErrorContext, SdkError};
use aws_sdk_servicecatalog::operation::describe_provisioning_artifact::DescribeProvisioningArtifactError;
use aws_sdk_servicecatalog::types::{AccessLevelFilter, AccessLevelFilterKey};

use super::block_on;

const COMPONENT: &str = "service_catalog";

/// Account Factory product lookups, run against the Control Tower
/// management account.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    client: aws_sdk_servicecatalog::Client,
}

fn sdk_error(operation: &str, error: impl std::error::Error) -> AftError {
    AftError::remote(COMPONENT, operation, DisplayErrorContext(error))
}

fn is_not_found(error: &SdkError<DescribeProvisioningArtifactError, HttpResponse>) -> bool {
    error
        .as_service_error()
        .is_some_and(DescribeProvisioningArtifactError::is_resource_not_found_exception)
}

impl ServiceCatalog {
    pub fn new(client: aws_sdk_servicecatalog::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_servicecatalog::Client::new(config))
    }

    pub fn product_id(&self, product_name: &str) -> AftResult<String> {
        let output = block_on(
            self.client
                .describe_product_as_admin()
                .name(product_name)
                .send(),
        )
        .map_err(|error| sdk_error("DescribeProductAsAdmin", error))?;

        let product_id = output
            .product_view_detail()
            .and_then(|detail| detail.product_view_summary())
            .and_then(|summary| summary.product_id())
            .ok_or_else(|| {
                AftError::remote(
                    COMPONENT,
                    "DescribeProductAsAdmin",
                    format!("product {product_name} has no product id"),
                )
            })?;

        tracing::info!(component = COMPONENT, product_name, product_id, "resolved product id");
        Ok(product_id.to_string())
    }

    /// First active provisioning artifact of the product, in listing order.
    pub fn active_artifact_id(&self, product_name: &str) -> AftResult<Option<String>> {
        let output = block_on(
            self.client
                .describe_product_as_admin()
                .name(product_name)
                .send(),
        )
        .map_err(|error| sdk_error("DescribeProductAsAdmin", error))?;

        let artifact_ids: Vec<String> = output
            .provisioning_artifact_summaries()
            .iter()
            .filter_map(|summary| summary.id().map(str::to_string))
            .collect();

        first_active_artifact(&artifact_ids, |artifact_id| {
            self.artifact_is_active(product_name, artifact_id)
        })
    }

    /// A missing artifact is reported as inactive.
    pub fn artifact_is_active(&self, product_name: &str, artifact_id: &str) -> AftResult<bool> {
        let result = block_on(
            self.client
                .describe_provisioning_artifact()
                .product_name(product_name)
                .provisioning_artifact_id(artifact_id)
                .send(),
        );

        let output = match result {
            Ok(output) => output,
            Err(error) if is_not_found(&error) => {
                tracing::info!(
                    component = COMPONENT,
                    artifact_id,
                    "provisioning artifact does not exist"
                );
                return Ok(false);
            }
            Err(error) => return Err(sdk_error("DescribeProvisioningArtifact", error)),
        };

        let active = output
            .provisioning_artifact_detail()
            .and_then(|detail| detail.active())
            .unwrap_or(false);
        tracing::info!(
            component = COMPONENT,
            artifact_id,
            active,
            "checked provisioning artifact"
        );
        Ok(active)
    }

    /// Every product provisioned by the calling account.
    pub fn provisioned_products(&self) -> AftResult<Vec<ProvisionedProduct>> {
        let filter = AccessLevelFilter::builder()
            .key(AccessLevelFilterKey::Account)
            .value("self")
            .build();

        collect_pages(|token| {
            let output = block_on(
                self.client
                    .scan_provisioned_products()
                    .access_level_filter(filter.clone())
                    .set_page_token(token.map(str::to_string))
                    .send(),
            )
            .map_err(|error| sdk_error("ScanProvisionedProducts", error))?;

            Ok(Page {
                items: output
                    .provisioned_products()
                    .iter()
                    .map(|product| ProvisionedProduct {
                        id: product.id().unwrap_or_default().to_string(),
                        product_id: product.product_id().unwrap_or_default().to_string(),
                        status: product
                            .status()
                            .map(|status| status.as_str().to_string())
                            .unwrap_or_default(),
                    })
                    .collect(),
                next_token: output.next_page_token().map(str::to_string),
            })
        })
    }

    pub fn product_provisioning_in_progress(&self, product_id: &str) -> AftResult<bool> {
        let products = self.provisioned_products()?;
        Ok(provisioning_in_progress(&products, product_id))
    }
}
