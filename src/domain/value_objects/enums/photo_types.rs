use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PhotoType {
    Pickup,
    Drop,
}

impl PhotoType {
    pub fn try_from_str(value: &str) -> Option<Self> {
        match value {
            "PICKUP" => Some(PhotoType::Pickup),
            "DROP" => Some(PhotoType::Drop),
            _ => None,
        }
    }
}

impl Display for PhotoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let photo_type = match self {
            PhotoType::Pickup => "PICKUP",
            PhotoType::Drop => "DROP",
        };
        write!(f, "{}", photo_type)
    }
}
