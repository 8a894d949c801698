use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::cars::CarEntity;

#[async_trait]
#[automock]
pub trait CarRepository {
    async fn find_by_id(&self, car_id: Uuid) -> Result<Option<CarEntity>>;
}
