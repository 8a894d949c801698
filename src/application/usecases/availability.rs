use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    application::errors::AppError,
    domain::{
        repositories::availability::AvailabilityRepository,
        value_objects::availability::{CarListingModel, SearchResultModel, UnavailableCarModel},
    },
};

/// Read-only availability search over a city's listings.
pub struct AvailabilityUseCase<A>
where
    A: AvailabilityRepository + Send + Sync,
{
    availability_repository: Arc<A>,
}

impl<A> AvailabilityUseCase<A>
where
    A: AvailabilityRepository + Send + Sync,
{
    pub fn new(availability_repository: Arc<A>) -> Self {
        Self {
            availability_repository,
        }
    }

    pub async fn search_cars(
        &self,
        city: &str,
        pickup: DateTime<Utc>,
        drop: DateTime<Utc>,
    ) -> Result<SearchResultModel, AppError> {
        if city.trim().is_empty() {
            return Err(AppError::validation("city is required"));
        }
        if pickup >= drop {
            return Err(AppError::validation(
                "pickupDateTime must be before dropDateTime",
            ));
        }

        let cars = self.availability_repository.list_city_cars(city).await?;
        debug!(city, candidates = cars.len(), "availability: checking city listings");

        let mut available = Vec::new();
        let mut not_available = Vec::new();
        for car in cars {
            let car_id = car.id;
            let conflicts = self
                .availability_repository
                .conflicting_windows(car_id, pickup, drop)
                .await?;
            let images = self.availability_repository.car_images(car_id).await?;
            let features = self.availability_repository.car_features(car_id).await?;

            let listing = CarListingModel::from_entity(car, images, features);
            if conflicts.is_empty() {
                available.push(listing);
            } else {
                not_available.push(UnavailableCarModel {
                    car: listing,
                    conflicting_windows: conflicts,
                });
            }
        }

        Ok(SearchResultModel {
            available,
            not_available,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::cars::CarEntity,
        repositories::availability::MockAvailabilityRepository,
        value_objects::availability::ConflictWindow,
    };
    use chrono::Duration;
    use uuid::Uuid;

    fn sample_car(city: &str) -> CarEntity {
        let now = Utc::now();
        CarEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "i20".to_string(),
            city: city.to_string(),
            price_per_hour: 90.0,
            security_deposit: 1500.0,
            seats: 5,
            doors: 4,
            luggage_capacity: 2,
            fuel_type: "PETROL".to_string(),
            transmission_type: "AUTOMATIC".to_string(),
            category: Some("HATCHBACK".to_string()),
            latitude: None,
            longitude: None,
            is_approved: true,
            car_enabled: true,
            repair_mode: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn partitions_cars_by_conflicts() {
        let free_car = sample_car("Pune");
        let busy_car = sample_car("Pune");
        let busy_id = busy_car.id;

        let pickup = Utc::now() + Duration::hours(1);
        let drop = pickup + Duration::hours(6);

        let mut repo = MockAvailabilityRepository::new();
        let cars = vec![free_car.clone(), busy_car.clone()];
        repo.expect_list_city_cars().returning(move |_| {
            let cars = cars.clone();
            Box::pin(async move { Ok(cars) })
        });
        repo.expect_conflicting_windows()
            .returning(move |car_id, start, end| {
                let windows = if car_id == busy_id {
                    vec![ConflictWindow {
                        start_date: start - Duration::hours(1),
                        end_date: end - Duration::hours(1),
                    }]
                } else {
                    Vec::new()
                };
                Box::pin(async move { Ok(windows) })
            });
        repo.expect_car_images()
            .returning(|_| Box::pin(async { Ok(vec!["a.jpg".to_string()]) }));
        repo.expect_car_features()
            .returning(|_| Box::pin(async { Ok(vec!["Sunroof".to_string()]) }));

        let usecase = AvailabilityUseCase::new(Arc::new(repo));
        let result = usecase.search_cars("Pune", pickup, drop).await.unwrap();

        assert_eq!(result.available.len(), 1);
        assert_eq!(result.not_available.len(), 1);
        assert_eq!(result.not_available[0].car.id, busy_id);
        assert_eq!(result.not_available[0].conflicting_windows.len(), 1);
        assert_eq!(result.available[0].images, vec!["a.jpg".to_string()]);
    }

    #[tokio::test]
    async fn inverted_window_is_rejected() {
        let usecase = AvailabilityUseCase::new(Arc::new(MockAvailabilityRepository::new()));
        let pickup = Utc::now();
        let result = usecase
            .search_cars("Pune", pickup, pickup - Duration::hours(1))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn blank_city_is_rejected() {
        let usecase = AvailabilityUseCase::new(Arc::new(MockAvailabilityRepository::new()));
        let pickup = Utc::now();
        let result = usecase
            .search_cars("  ", pickup, pickup + Duration::hours(2))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
