use aft_common_core::error::{AftError, AftResult};
use aws_sdk_ssm::error::DisplayErrorContext;

use super::block_on;

const COMPONENT: &str = "ssm";

/// Reads deployment parameters (table names, role names, ARNs) by path.
pub trait ParameterStore {
    fn parameter(&self, name: &str, decrypt: bool) -> AftResult<String>;
}

#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_ssm::Client::new(config))
    }
}

impl ParameterStore for SsmParameterStore {
    fn parameter(&self, name: &str, decrypt: bool) -> AftResult<String> {
        let output = block_on(
            self.client
                .get_parameter()
                .name(name)
                .with_decryption(decrypt)
                .send(),
        )
        .map_err(|error| AftError::remote(COMPONENT, "GetParameter", DisplayErrorContext(error)))?;

        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_string)
            .ok_or_else(|| {
                AftError::remote(
                    COMPONENT,
                    "GetParameter",
                    format!("parameter {name} has no value"),
                )
            })
    }
}
