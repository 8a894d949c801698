use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::discount_types::DiscountType;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCouponModel {
    pub coupon_code: String,
    pub booking_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountQuote {
    pub discount: f64,
    pub final_amount: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the discount for a booking amount. Percent discounts are capped
/// at `max_discount`; every discount is clamped to the booking amount so the
/// final amount can never go negative.
pub fn compute_discount(
    amount: f64,
    discount_type: DiscountType,
    discount_value: f64,
    max_discount: Option<f64>,
) -> DiscountQuote {
    let raw = match discount_type {
        DiscountType::Percent => {
            let discount = amount * discount_value / 100.0;
            match max_discount {
                Some(cap) => discount.min(cap),
                None => discount,
            }
        }
        DiscountType::Flat => discount_value,
    };

    let discount = round2(raw.clamp(0.0, amount));
    DiscountQuote {
        discount,
        final_amount: round2(amount - discount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_discount_is_capped() {
        let quote = compute_discount(1000.0, DiscountType::Percent, 10.0, Some(50.0));
        assert_eq!(quote.discount, 50.0);
        assert_eq!(quote.final_amount, 950.0);
    }

    #[test]
    fn percent_discount_without_cap() {
        let quote = compute_discount(1000.0, DiscountType::Percent, 10.0, None);
        assert_eq!(quote.discount, 100.0);
        assert_eq!(quote.final_amount, 900.0);
    }

    #[test]
    fn flat_discount_is_subtracted() {
        let quote = compute_discount(1000.0, DiscountType::Flat, 200.0, None);
        assert_eq!(quote.discount, 200.0);
        assert_eq!(quote.final_amount, 800.0);
    }

    #[test]
    fn flat_discount_never_drives_amount_negative() {
        let quote = compute_discount(150.0, DiscountType::Flat, 500.0, None);
        assert_eq!(quote.discount, 150.0);
        assert_eq!(quote.final_amount, 0.0);
    }

    #[test]
    fn discount_is_rounded_to_two_decimals() {
        let quote = compute_discount(999.99, DiscountType::Percent, 3.33, None);
        assert_eq!(quote.discount, 33.3);
        assert_eq!(quote.final_amount, 966.69);
    }

    #[test]
    fn negative_values_never_produce_negative_discounts() {
        let quote = compute_discount(1000.0, DiscountType::Flat, -50.0, None);
        assert_eq!(quote.discount, 0.0);
        assert_eq!(quote.final_amount, 1000.0);
    }
}
