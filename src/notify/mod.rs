//! Alert dispatch for new listings.

mod sns;

use async_trait::async_trait;

pub use sns::SnsPublisher;

use crate::error::Result;

/// Outbound transport for batched alerts.
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    /// Publish a single text payload.
    async fn publish(&self, message: &str) -> Result<()>;
}
