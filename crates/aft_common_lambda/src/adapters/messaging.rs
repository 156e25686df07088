use aft_common_core::error::{AftError, AftResult};
use serde_json::Value;
use uuid::Uuid;

use super::block_on;

/// A message taken off a queue; `receipt_handle` is what deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub message_id: String,
    pub receipt_handle: String,
    pub body: String,
}

impl QueueMessage {
    pub fn json_body(&self) -> AftResult<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// FIFO queue operations used by the account request pipeline.
pub trait QueueClient {
    /// Sends `message` as JSON with a fresh deduplication and group id, so
    /// identical bodies are never collapsed. Returns the message id.
    fn send_message(&self, queue_url: &str, message: &Value) -> AftResult<String>;

    /// Receives at most one message.
    fn receive_message(&self, queue_url: &str) -> AftResult<Option<QueueMessage>>;

    fn delete_message(&self, queue_url: &str, receipt_handle: &str) -> AftResult<()>;
}

pub trait TopicPublisher {
    fn publish(&self, topic_arn: &str, message: &str, subject: &str) -> AftResult<String>;
}

#[derive(Debug, Clone)]
pub struct SqsQueueClient {
    client: aws_sdk_sqs::Client,
}

impl SqsQueueClient {
    pub fn new(client: aws_sdk_sqs::Client) -> Self {
        Self { client }
    }
}

fn sqs_error(operation: &str, error: impl std::error::Error) -> AftError {
    AftError::remote("sqs", operation, aws_sdk_sqs::error::DisplayErrorContext(error))
}

impl QueueClient for SqsQueueClient {
    fn send_message(&self, queue_url: &str, message: &Value) -> AftResult<String> {
        let unique_id = Uuid::new_v4().to_string();
        tracing::info!(component = "sqs", queue_url, "sending message");

        let output = block_on(
            self.client
                .send_message()
                .queue_url(queue_url)
                .message_body(message.to_string())
                .message_deduplication_id(&unique_id)
                .message_group_id(&unique_id)
                .send(),
        )
        .map_err(|error| sqs_error("SendMessage", error))?;

        Ok(output.message_id().unwrap_or_default().to_string())
    }

    fn receive_message(&self, queue_url: &str) -> AftResult<Option<QueueMessage>> {
        let output = block_on(
            self.client
                .receive_message()
                .queue_url(queue_url)
                .max_number_of_messages(1)
                .receive_request_attempt_id(Uuid::new_v4().to_string())
                .send(),
        )
        .map_err(|error| sqs_error("ReceiveMessage", error))?;

        let message = output.messages().first().map(|message| QueueMessage {
            message_id: message.message_id().unwrap_or_default().to_string(),
            receipt_handle: message.receipt_handle().unwrap_or_default().to_string(),
            body: message.body().unwrap_or_default().to_string(),
        });

        match &message {
            Some(message) => tracing::info!(
                component = "sqs",
                queue_url,
                message_id = %message.message_id,
                "message pending processing"
            ),
            None => tracing::info!(component = "sqs", queue_url, "no messages pending processing"),
        }
        Ok(message)
    }

    fn delete_message(&self, queue_url: &str, receipt_handle: &str) -> AftResult<()> {
        block_on(
            self.client
                .delete_message()
                .queue_url(queue_url)
                .receipt_handle(receipt_handle)
                .send(),
        )
        .map(|_| ())
        .map_err(|error| sqs_error("DeleteMessage", error))
    }
}

#[derive(Debug, Clone)]
pub struct SnsTopicPublisher {
    client: aws_sdk_sns::Client,
}

impl SnsTopicPublisher {
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }
}

impl TopicPublisher for SnsTopicPublisher {
    fn publish(&self, topic_arn: &str, message: &str, subject: &str) -> AftResult<String> {
        let output = block_on(
            self.client
                .publish()
                .topic_arn(topic_arn)
                .message(message)
                .subject(subject)
                .send(),
        )
        .map_err(|error| {
            AftError::remote("sns", "Publish", aws_sdk_sns::error::DisplayErrorContext(error))
        })?;

        Ok(output.message_id().unwrap_or_default().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_json_body() {
        let message = QueueMessage {
            message_id: "m-1".to_string(),
            receipt_handle: "handle".to_string(),
            body: r#"{"operation":"ADD","control_tower_parameters":{}}"#.to_string(),
        };

        let body = message.json_body().expect("body should decode");
        assert_eq!(body["operation"], "ADD");
    }

    #[test]
    fn malformed_body_is_a_serialization_error() {
        let message = QueueMessage {
            message_id: "m-1".to_string(),
            receipt_handle: "handle".to_string(),
            body: "not json".to_string(),
        };

        let error = message.json_body().expect_err("body should not decode");
        assert_eq!(error.kind(), "serialization");
    }
}
