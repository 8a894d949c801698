use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{entities::cars::CarEntity, value_objects::availability::ConflictWindow};

#[async_trait]
#[automock]
pub trait AvailabilityRepository {
    /// Approved, enabled, non-repair-mode listings in a city.
    async fn list_city_cars(&self, city: &str) -> Result<Vec<CarEntity>>;

    /// Windows of active reservations intersecting `[start, end)` under the
    /// half-open rule.
    async fn conflicting_windows(
        &self,
        car_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ConflictWindow>>;

    async fn car_images(&self, car_id: Uuid) -> Result<Vec<String>>;

    async fn car_features(&self, car_id: Uuid) -> Result<Vec<String>>;
}
