//! SSM parameter names published by the Account Factory deployment.

pub const AFT_DDB_META_TABLE: &str = "/aft/resources/ddb/aft-request-metadata-table-name";
pub const AFT_DDB_REQ_TABLE: &str = "/aft/resources/ddb/aft-request-table-name";
pub const AFT_DDB_AUDIT_TABLE: &str = "/aft/resources/ddb/aft-request-audit-table-name";
pub const AFT_EVENTS_TABLE: &str = "/aft/resources/ddb/aft-controltower-events-table-name";

pub const AFT_SESSION_NAME: &str = "/aft/resources/iam/aft-session-name";
pub const AFT_ADMIN_ROLE: &str = "/aft/resources/iam/aft-administrator-role-name";
pub const AFT_EXEC_ROLE: &str = "/aft/resources/iam/aft-execution-role-name";

pub const SC_PRODUCT_NAME: &str = "/aft/resources/sc/account-factory-product-name";
pub const SNS_TOPIC_ARN: &str = "/aft/account/aft-management/sns/topic-arn";
pub const SNS_FAILURE_TOPIC_ARN: &str = "/aft/account/aft-management/sns/failure-topic-arn";
pub const ACCOUNT_REQUEST_QUEUE: &str = "/aft/resources/sqs/aft-request-queue-name";
pub const AFT_SFN_NAME: &str =
    "/aft/account/aft-management/sfn/aft-account-provisioning-framework-sfn-name";

pub const AFT_ACCOUNT_PROVISIONING_FRAMEWORK_LAMBDA: &str =
    "/aft/resources/lambda/aft-invoke-aft-account-provisioning-framework";
pub const AFT_REQUEST_ACTION_TRIGGER_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-account-request-action-trigger-function-arn";
pub const AFT_ACCOUNT_REQUEST_AUDIT_TRIGGER_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-account-request-audit-trigger-function-arn";
pub const AFT_ACCOUNT_REQUEST_PROCESSOR_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-account-request-processor-function-arn";
pub const AFT_CONTROLTOWER_EVENT_LOGGER_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-controltower-event-logger-function-arn";
pub const AFT_INVOKE_AFT_ACCOUNT_PROVISIONING_FRAMEWORK_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-invoke-aft-account-provisioning-framework-function-arn";
pub const AFT_ACCOUNT_PROVISIONING_FRAMEWORK_VALIDATE_REQUEST_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-account-provisioning-framework-validate-request-function-arn";
pub const AFT_ACCOUNT_PROVISIONING_FRAMEWORK_GET_ACCOUNT_INFO_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-account-provisioning-framework-get-account-info-function-arn";
pub const AFT_ACCOUNT_PROVISIONING_FRAMEWORK_CREATE_ROLE_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-account-provisioning-framework-create-role-function-arn";
pub const AFT_ACCOUNT_PROVISIONING_FRAMEWORK_TAG_ACCOUNT_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-account-provisioning-framework-tag-account-function-arn";
pub const AFT_ACCOUNT_PROVISIONING_FRAMEWORK_PERSIST_METADATA_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-account-provisioning-framework-persist-metadata-function-arn";
pub const AFT_ACCOUNT_PROVISIONING_FRAMEWORK_NOTIFY_ERROR_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-account-provisioning-framework-notify-error-function-arn";
pub const AFT_ACCOUNT_PROVISIONING_FRAMEWORK_NOTIFY_SUCCESS_FUNCTION_ARN: &str =
    "/aft/resources/lambda/aft-account-provisioning-framework-notify-success-function-arn";

pub const AFT_MAXIMUM_CONCURRENT_CUSTOMIZATIONS: &str =
    "/aft/config/customizations/maximum_concurrent_customizations";
pub const FEATURE_CLOUDTRAIL_DATA_EVENTS_ENABLED: &str =
    "/aft/config/feature/cloudtrail-data-events-enabled";
pub const FEATURE_ENTERPRISE_SUPPORT_ENABLED: &str =
    "/aft/config/feature/enterprise-support-enabled";
pub const FEATURE_DEFAULT_VPCS_ENABLED: &str = "/aft/config/feature/delete-default-vpcs-enabled";

pub const ACCOUNT_CT_MANAGEMENT_ACCOUNT_ID: &str = "/aft/account/ct-management/account-id";
pub const ACCOUNT_AUDIT_ACCOUNT_ID: &str = "/aft/account/audit/account-id";
pub const ACCOUNT_LOG_ARCHIVE_ACCOUNT_ID: &str = "/aft/account/log-archive/account-id";
pub const ACCOUNT_AFT_MANAGEMENT_ACCOUNT_ID: &str = "/aft/account/aft-management/account-id";
