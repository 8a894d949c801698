use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::cars::CarEntity;

/// A stored reservation window blocking part of a requested interval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConflictWindow {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Half-open interval intersection: `[a_start, a_end)` and `[b_start, b_end)`
/// conflict unless one ends before (or exactly when) the other starts.
pub fn windows_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    !(a_end <= b_start || a_start >= b_end)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarListingModel {
    pub id: Uuid,
    pub host_id: Uuid,
    pub title: String,
    pub city: String,
    pub price_per_hour: f64,
    pub security_deposit: f64,
    pub seats: i32,
    pub doors: i32,
    pub luggage_capacity: i32,
    pub fuel_type: String,
    pub transmission_type: String,
    pub category: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub images: Vec<String>,
    pub features: Vec<String>,
}

impl CarListingModel {
    pub fn from_entity(entity: CarEntity, images: Vec<String>, features: Vec<String>) -> Self {
        Self {
            id: entity.id,
            host_id: entity.user_id,
            title: entity.title,
            city: entity.city,
            price_per_hour: entity.price_per_hour,
            security_deposit: entity.security_deposit,
            seats: entity.seats,
            doors: entity.doors,
            luggage_capacity: entity.luggage_capacity,
            fuel_type: entity.fuel_type,
            transmission_type: entity.transmission_type,
            category: entity.category,
            latitude: entity.latitude,
            longitude: entity.longitude,
            images,
            features,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnavailableCarModel {
    #[serde(flatten)]
    pub car: CarListingModel,
    pub conflicting_windows: Vec<ConflictWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultModel {
    pub available: Vec<CarListingModel>,
    pub not_available: Vec<UnavailableCarModel>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap()
    }

    #[test]
    fn overlapping_windows_conflict() {
        assert!(windows_overlap(at(10), at(14), at(12), at(16)));
        assert!(windows_overlap(at(12), at(16), at(10), at(14)));
        assert!(windows_overlap(at(10), at(20), at(12), at(14)));
        assert!(windows_overlap(at(12), at(14), at(10), at(20)));
    }

    #[test]
    fn disjoint_windows_do_not_conflict() {
        assert!(!windows_overlap(at(8), at(10), at(12), at(14)));
        assert!(!windows_overlap(at(12), at(14), at(8), at(10)));
    }

    #[test]
    fn boundary_touch_is_not_a_conflict() {
        // [8, 12) then [12, 16): the first drop and the second pickup share
        // an instant but not an interval.
        assert!(!windows_overlap(at(8), at(12), at(12), at(16)));
        assert!(!windows_overlap(at(12), at(16), at(8), at(12)));

        let almost = at(12) - Duration::seconds(1);
        assert!(windows_overlap(at(8), at(12), almost, at(16)));
    }
}
