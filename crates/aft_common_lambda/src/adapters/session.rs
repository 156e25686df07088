//! Caller identity and the role chains into the Control Tower accounts.
//!
//! AFT reaches the management and log-archive accounts in two hops: it first
//! assumes its administrator role in the local account, then the execution
//! role in the target account.

use std::time::SystemTime;

use aft_common_core::arns::{role_arn, CallerIdentity};
use aft_common_core::error::{AftError, AftResult};
use aft_common_core::params;
use aws_config::SdkConfig;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;
use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata};

use super::block_on;
use super::parameters::ParameterStore;

const COMPONENT: &str = "sts";
const SESSION_DURATION_SECONDS: i32 = 900;
const CREDENTIALS_PROVIDER_NAME: &str = "aft-assume-role";
const ACCESS_DENIED_MESSAGE: &str = "Lambda does not have permission to assume the IAM role.";
const INTERNAL_ERROR: &str = "InternalError";

pub fn caller_identity(config: &SdkConfig) -> AftResult<CallerIdentity> {
    let region = config
        .region()
        .map(|region| region.to_string())
        .ok_or_else(|| AftError::configuration("no AWS region configured"))?;

    let output = block_on(aws_sdk_sts::Client::new(config).get_caller_identity().send())
        .map_err(|error| {
            AftError::remote(COMPONENT, "GetCallerIdentity", DisplayErrorContext(error))
        })?;

    let account = output.account().ok_or_else(|| {
        AftError::remote(COMPONENT, "GetCallerIdentity", "response missing Account")
    })?;

    Ok(CallerIdentity {
        account: account.to_string(),
        region,
    })
}

/// Assumes `role_arn` and returns a config that signs with the new
/// credentials. Nothing from the STS error message is passed on.
pub fn assume_role(
    config: &SdkConfig,
    role_arn: &str,
    session_name: &str,
    external_id: Option<&str>,
) -> AftResult<SdkConfig> {
    let output = block_on(
        aws_sdk_sts::Client::new(config)
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .duration_seconds(SESSION_DURATION_SECONDS)
            .set_external_id(external_id.map(str::to_string))
            .send(),
    )
    .map_err(|error| scrubbed_assume_role_error(error.code()))?;

    let credentials = output.credentials().ok_or_else(|| {
        AftError::remote(COMPONENT, "AssumeRole", "response missing Credentials")
    })?;

    let credentials = Credentials::new(
        credentials.access_key_id(),
        credentials.secret_access_key(),
        Some(credentials.session_token().to_string()),
        SystemTime::try_from(*credentials.expiration()).ok(),
        CREDENTIALS_PROVIDER_NAME,
    );

    Ok(config
        .to_builder()
        .credentials_provider(SharedCredentialsProvider::new(credentials))
        .build())
}

fn scrubbed_assume_role_error(code: Option<&str>) -> AftError {
    match code {
        Some(code) if code.contains("AccessDenied") => {
            AftError::access_denied(ACCESS_DENIED_MESSAGE)
        }
        _ => {
            tracing::error!(component = COMPONENT, operation = "AssumeRole", "assume role failed");
            AftError::remote(COMPONENT, "AssumeRole", INTERNAL_ERROR)
        }
    }
}

/// Role ARNs and session name for one two-hop chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChain {
    pub administrator_role_arn: String,
    pub execution_role_arn: String,
    pub session_name: String,
}

impl RoleChain {
    pub fn resolve(
        identity: &CallerIdentity,
        parameters: &impl ParameterStore,
        target_account_parameter: &str,
    ) -> AftResult<Self> {
        let target_account = parameters.parameter(target_account_parameter, false)?;
        let administrator_role = parameters.parameter(params::AFT_ADMIN_ROLE, false)?;
        let execution_role = parameters.parameter(params::AFT_EXEC_ROLE, false)?;
        let session_name = parameters.parameter(params::AFT_SESSION_NAME, false)?;

        Ok(Self {
            administrator_role_arn: role_arn(identity, &administrator_role, None),
            execution_role_arn: role_arn(identity, &execution_role, Some(&target_account)),
            session_name,
        })
    }

    pub fn assume(&self, config: &SdkConfig) -> AftResult<SdkConfig> {
        let local = assume_role(config, &self.administrator_role_arn, &self.session_name, None)?;
        assume_role(&local, &self.execution_role_arn, &self.session_name, None)
    }
}

pub fn ct_management_config(
    config: &SdkConfig,
    parameters: &impl ParameterStore,
) -> AftResult<SdkConfig> {
    chained_config(config, parameters, params::ACCOUNT_CT_MANAGEMENT_ACCOUNT_ID)
}

pub fn log_archive_config(
    config: &SdkConfig,
    parameters: &impl ParameterStore,
) -> AftResult<SdkConfig> {
    chained_config(config, parameters, params::ACCOUNT_LOG_ARCHIVE_ACCOUNT_ID)
}

fn chained_config(
    config: &SdkConfig,
    parameters: &impl ParameterStore,
    target_account_parameter: &str,
) -> AftResult<SdkConfig> {
    let identity = caller_identity(config)?;
    RoleChain::resolve(&identity, parameters, target_account_parameter)?
        .assume(config)
        .inspect_err(|error| {
            tracing::error!(
                component = COMPONENT,
                target = target_account_parameter,
                kind = error.kind(),
                "role chain failed"
            )
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MapParameterStore(HashMap<&'static str, &'static str>);

    impl ParameterStore for MapParameterStore {
        fn parameter(&self, name: &str, _decrypt: bool) -> AftResult<String> {
            self.0
                .get(name)
                .map(|value| value.to_string())
                .ok_or_else(|| AftError::remote("ssm", "GetParameter", format!("{name} missing")))
        }
    }

    fn parameters() -> MapParameterStore {
        MapParameterStore(HashMap::from([
            (params::ACCOUNT_CT_MANAGEMENT_ACCOUNT_ID, "111122223333"),
            (params::ACCOUNT_LOG_ARCHIVE_ACCOUNT_ID, "444455556666"),
            (params::AFT_ADMIN_ROLE, "AWSAFTAdmin"),
            (params::AFT_EXEC_ROLE, "AWSAFTExecution"),
            (params::AFT_SESSION_NAME, "AWS-AFT-Session"),
        ]))
    }

    fn identity() -> CallerIdentity {
        CallerIdentity {
            account: "999988887777".to_string(),
            region: "eu-west-1".to_string(),
        }
    }

    #[test]
    fn chain_assumes_local_admin_then_target_execution_role() {
        let chain =
            RoleChain::resolve(&identity(), &parameters(), params::ACCOUNT_CT_MANAGEMENT_ACCOUNT_ID)
                .expect("chain should resolve");

        assert_eq!(
            chain,
            RoleChain {
                administrator_role_arn: "arn:aws:iam::999988887777:role/AWSAFTAdmin".to_string(),
                execution_role_arn: "arn:aws:iam::111122223333:role/AWSAFTExecution".to_string(),
                session_name: "AWS-AFT-Session".to_string(),
            }
        );
    }

    #[test]
    fn log_archive_chain_targets_log_archive_account() {
        let chain =
            RoleChain::resolve(&identity(), &parameters(), params::ACCOUNT_LOG_ARCHIVE_ACCOUNT_ID)
                .expect("chain should resolve");

        assert_eq!(
            chain.execution_role_arn,
            "arn:aws:iam::444455556666:role/AWSAFTExecution"
        );
    }

    #[test]
    fn missing_parameter_fails_resolution() {
        let mut store = parameters();
        store.0.remove(params::AFT_EXEC_ROLE);

        let error =
            RoleChain::resolve(&identity(), &store, params::ACCOUNT_CT_MANAGEMENT_ACCOUNT_ID)
                .expect_err("missing role should fail");
        assert_eq!(error.operation(), Some("GetParameter"));
    }

    #[test]
    fn access_denied_is_replaced_with_fixed_message() {
        let error = scrubbed_assume_role_error(Some("AccessDenied"));
        assert_eq!(error, AftError::access_denied(ACCESS_DENIED_MESSAGE));
        assert!(!error.to_string().contains("arn:aws"));
    }

    #[test]
    fn other_failures_collapse_to_internal_error() {
        for code in [Some("RegionDisabledException"), Some("ExpiredToken"), None] {
            let error = scrubbed_assume_role_error(code);
            assert_eq!(error, AftError::remote("sts", "AssumeRole", "InternalError"));
        }
    }
}
