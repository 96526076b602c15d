//! AWS SNS alert publisher.

use async_trait::async_trait;
use aws_sdk_sns::Client;
use aws_sdk_sns::error::DisplayErrorContext;

use crate::error::{AppError, Result};
use crate::notify::AlertPublisher;

/// Publishes alerts to an SNS topic or platform endpoint by ARN.
pub struct SnsPublisher {
    client: Client,
    target_arn: String,
}

impl SnsPublisher {
    /// Create a publisher for the given target ARN.
    pub fn new(client: Client, target_arn: impl Into<String>) -> Self {
        Self {
            client,
            target_arn: target_arn.into(),
        }
    }

    /// Create a publisher using ambient AWS credentials.
    pub async fn from_env(target_arn: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), target_arn)
    }
}

#[async_trait]
impl AlertPublisher for SnsPublisher {
    async fn publish(&self, message: &str) -> Result<()> {
        // Per-protocol envelope with only a default rendering, no attributes.
        let envelope = serde_json::json!({ "default": message }).to_string();

        log::debug!("Sending SNS alert to {}", self.target_arn);

        self.client
            .publish()
            .target_arn(&self.target_arn)
            .message(envelope)
            .message_structure("json")
            .send()
            .await
            .map_err(|e| AppError::sns(DisplayErrorContext(e)))?;

        Ok(())
    }
}
