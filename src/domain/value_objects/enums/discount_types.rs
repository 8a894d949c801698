use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiscountType {
    Percent,
    Flat,
}

impl DiscountType {
    pub fn try_from_str(value: &str) -> Option<Self> {
        match value {
            "PERCENT" => Some(DiscountType::Percent),
            "FLAT" => Some(DiscountType::Flat),
            _ => None,
        }
    }
}

impl Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let discount_type = match self {
            DiscountType::Percent => "PERCENT",
            DiscountType::Flat => "FLAT",
        };
        write!(f, "{}", discount_type)
    }
}
