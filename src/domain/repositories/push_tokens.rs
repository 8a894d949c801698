use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

#[async_trait]
#[automock]
pub trait PushTokenRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<String>>;
}
