use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

use crate::domain::repositories::{
    notifications::BookingNotifier, push_tokens::PushTokenRepository,
};

#[derive(Debug, Clone)]
struct PushMessage {
    host_id: Uuid,
    reservation_id: Uuid,
}

/// Outbound push queue. Delivery runs on a spawned worker so a slow or
/// failing push endpoint never stalls the booking that enqueued it.
#[derive(Clone)]
pub struct PushNotifier {
    tx: mpsc::Sender<PushMessage>,
}

impl PushNotifier {
    pub fn new<T>(endpoint: String, push_token_repository: Arc<T>) -> Self
    where
        T: PushTokenRepository + Send + Sync + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<PushMessage>(256);

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .expect("reqwest client must build");

        tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                if let Err(error) =
                    deliver(&client, &endpoint, &push_token_repository, &message).await
                {
                    warn!(
                        host_id = %message.host_id,
                        reservation_id = %message.reservation_id,
                        error = %error,
                        "push: delivery failed"
                    );
                }
            }
        });

        Self { tx }
    }
}

async fn deliver<T>(
    client: &reqwest::Client,
    endpoint: &str,
    push_token_repository: &Arc<T>,
    message: &PushMessage,
) -> Result<()>
where
    T: PushTokenRepository + Send + Sync,
{
    let tokens = push_token_repository.list_for_user(message.host_id).await?;
    if tokens.is_empty() {
        return Ok(());
    }

    for token in tokens {
        client
            .post(endpoint)
            .json(&json!({
                "to": token,
                "title": "New booking confirmed",
                "body": "A renter has booked your car. Open the app for details.",
                "data": { "reservationId": message.reservation_id },
            }))
            .send()
            .await?
            .error_for_status()?;
    }

    Ok(())
}

#[async_trait]
impl BookingNotifier for PushNotifier {
    async fn booking_confirmed(&self, host_id: Uuid, reservation_id: Uuid) -> Result<()> {
        // A full queue is dropped, not awaited; the booking flow must not
        // block on notification backpressure.
        if let Err(error) = self.tx.try_send(PushMessage {
            host_id,
            reservation_id,
        }) {
            warn!(%host_id, %reservation_id, error = %error, "push: queue full, dropping");
        }
        Ok(())
    }
}
