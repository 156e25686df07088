use serde::{Deserialize, Serialize};

/// The account and region the current credentials act in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub account: String,
    pub region: String,
}

/// IAM role ARN in `account_id`, or in the caller's account when absent.
pub fn role_arn(identity: &CallerIdentity, role_name: &str, account_id: Option<&str>) -> String {
    let account = account_id
        .filter(|id| !id.is_empty())
        .unwrap_or(identity.account.as_str());
    format!("arn:aws:iam::{account}:role/{role_name}")
}

pub fn sqs_queue_url(identity: &CallerIdentity, queue_name: &str) -> String {
    format!(
        "https://sqs.{}.amazonaws.com/{}/{queue_name}",
        identity.region, identity.account
    )
}

pub fn state_machine_arn(identity: &CallerIdentity, state_machine_name: &str) -> String {
    format!(
        "arn:aws:states:{}:{}:stateMachine:{state_machine_name}",
        identity.region, identity.account
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> CallerIdentity {
        CallerIdentity {
            account: "123456789012".to_string(),
            region: "us-east-1".to_string(),
        }
    }

    #[test]
    fn role_arn_defaults_to_caller_account() {
        assert_eq!(
            role_arn(&identity(), "AWSAFTAdmin", None),
            "arn:aws:iam::123456789012:role/AWSAFTAdmin"
        );
        assert_eq!(
            role_arn(&identity(), "AWSAFTExecution", Some("210987654321")),
            "arn:aws:iam::210987654321:role/AWSAFTExecution"
        );
    }

    #[test]
    fn builds_queue_url_and_state_machine_arn() {
        assert_eq!(
            sqs_queue_url(&identity(), "aft-account-request.fifo"),
            "https://sqs.us-east-1.amazonaws.com/123456789012/aft-account-request.fifo"
        );
        assert_eq!(
            state_machine_arn(&identity(), "aft-account-provisioning-framework"),
            "arn:aws:states:us-east-1:123456789012:stateMachine:aft-account-provisioning-framework"
        );
    }
}
