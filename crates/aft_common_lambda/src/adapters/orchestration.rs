use aft_common_core::error::{AftError, AftResult};
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{InvocationType, LogType};
use serde_json::Value;

use super::block_on;

pub trait StateMachineStarter {
    /// Starts an execution and returns its ARN.
    fn start_execution(&self, state_machine_arn: &str, input: &Value) -> AftResult<String>;
}

pub trait FunctionInvoker {
    /// Fire-and-forget invocation; returns the HTTP status reported by Lambda.
    fn invoke_event(&self, function_name: &str, payload: &[u8]) -> AftResult<i32>;
}

#[derive(Debug, Clone)]
pub struct StepFunctionsStarter {
    client: aws_sdk_sfn::Client,
}

impl StepFunctionsStarter {
    pub fn new(client: aws_sdk_sfn::Client) -> Self {
        Self { client }
    }
}

impl StateMachineStarter for StepFunctionsStarter {
    fn start_execution(&self, state_machine_arn: &str, input: &Value) -> AftResult<String> {
        tracing::info!(component = "sfn", state_machine_arn, "starting execution");

        let output = block_on(
            self.client
                .start_execution()
                .state_machine_arn(state_machine_arn)
                .input(input.to_string())
                .send(),
        )
        .map_err(|error| {
            AftError::remote(
                "sfn",
                "StartExecution",
                aws_sdk_sfn::error::DisplayErrorContext(error),
            )
        })?;

        Ok(output.execution_arn().to_string())
    }
}

#[derive(Debug, Clone)]
pub struct LambdaFunctionInvoker {
    client: aws_sdk_lambda::Client,
}

impl LambdaFunctionInvoker {
    pub fn new(client: aws_sdk_lambda::Client) -> Self {
        Self { client }
    }
}

impl FunctionInvoker for LambdaFunctionInvoker {
    fn invoke_event(&self, function_name: &str, payload: &[u8]) -> AftResult<i32> {
        tracing::info!(component = "lambda", function_name, "invoking function");

        let output = block_on(
            self.client
                .invoke()
                .function_name(function_name)
                .invocation_type(InvocationType::Event)
                .log_type(LogType::Tail)
                .payload(Blob::new(payload.to_vec()))
                .send(),
        )
        .map_err(|error| {
            AftError::remote(
                "lambda",
                "Invoke",
                aws_sdk_lambda::error::DisplayErrorContext(error),
            )
        })?;

        Ok(output.status_code())
    }
}
