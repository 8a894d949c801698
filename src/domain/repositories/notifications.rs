use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

#[async_trait]
#[automock]
pub trait BookingNotifier {
    /// Best effort: enqueues a push to the host. Must never block or fail
    /// the booking that triggered it.
    async fn booking_confirmed(&self, host_id: Uuid, reservation_id: Uuid) -> Result<()>;
}
