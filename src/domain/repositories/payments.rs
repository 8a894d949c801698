use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::payments::PaymentOrder;

#[async_trait]
#[automock]
pub trait PaymentGateway {
    /// Creates a provider order for the amount in minor units; the client
    /// completes the payment against it externally.
    async fn create_order(&self, amount_minor: i64, receipt: &str) -> Result<PaymentOrder>;
}
