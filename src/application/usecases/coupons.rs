use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    application::errors::AppError,
    domain::{
        repositories::coupons::CouponRepository,
        value_objects::{
            coupons::{ApplyCouponModel, DiscountQuote, compute_discount},
            enums::discount_types::DiscountType,
        },
    },
};

pub struct CouponUseCase<C>
where
    C: CouponRepository + Send + Sync,
{
    coupon_repository: Arc<C>,
}

impl<C> CouponUseCase<C>
where
    C: CouponRepository + Send + Sync,
{
    pub fn new(coupon_repository: Arc<C>) -> Self {
        Self { coupon_repository }
    }

    pub async fn apply(
        &self,
        user_id: Uuid,
        apply_coupon_model: ApplyCouponModel,
    ) -> Result<DiscountQuote, AppError> {
        if apply_coupon_model.coupon_code.trim().is_empty() {
            return Err(AppError::validation("couponCode is required"));
        }
        if apply_coupon_model.booking_amount <= 0.0 {
            return Err(AppError::validation("bookingAmount must be positive"));
        }

        let coupon = self
            .coupon_repository
            .find_valid(&apply_coupon_model.coupon_code, Utc::now())
            .await?
            .ok_or_else(|| AppError::conflict("Coupon not valid or expired"))?;

        if apply_coupon_model.booking_amount < coupon.min_amount {
            return Err(AppError::conflict(format!(
                "Booking amount must be at least {}",
                coupon.min_amount
            )));
        }

        let used = self
            .coupon_repository
            .usage_count(user_id, &coupon.code)
            .await?;
        if used >= i64::from(coupon.usage_limit) {
            return Err(AppError::conflict("Coupon usage limit reached"));
        }

        let discount_type = DiscountType::try_from_str(&coupon.discount_type)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("unknown discount type")))?;

        let quote = compute_discount(
            apply_coupon_model.booking_amount,
            discount_type,
            coupon.discount_value,
            coupon.max_discount,
        );

        info!(%user_id, code = %coupon.code, discount = quote.discount, "coupons: applied");
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::coupons::CouponEntity, repositories::coupons::MockCouponRepository,
    };
    use chrono::Duration;
    use mockall::predicate::eq;

    fn sample_coupon(code: &str, discount_type: DiscountType) -> CouponEntity {
        let now = Utc::now();
        CouponEntity {
            id: Uuid::new_v4(),
            code: code.to_string(),
            discount_type: discount_type.to_string(),
            discount_value: match discount_type {
                DiscountType::Percent => 10.0,
                DiscountType::Flat => 200.0,
            },
            min_amount: 500.0,
            max_discount: Some(50.0),
            starts_at: now - Duration::days(1),
            ends_at: now + Duration::days(1),
            usage_limit: 2,
            created_at: now,
        }
    }

    fn model(amount: f64) -> ApplyCouponModel {
        ApplyCouponModel {
            coupon_code: "WELCOME10".to_string(),
            booking_amount: amount,
        }
    }

    #[tokio::test]
    async fn percent_coupon_is_capped_at_max_discount() {
        let user_id = Uuid::new_v4();

        let mut repo = MockCouponRepository::new();
        repo.expect_find_valid().returning(|code, _| {
            let coupon = sample_coupon(code, DiscountType::Percent);
            Box::pin(async move { Ok(Some(coupon)) })
        });
        repo.expect_usage_count()
            .with(eq(user_id), eq("WELCOME10"))
            .returning(|_, _| Box::pin(async { Ok(0) }));

        let usecase = CouponUseCase::new(Arc::new(repo));
        let quote = usecase.apply(user_id, model(1000.0)).await.unwrap();

        assert_eq!(quote.discount, 50.0);
        assert_eq!(quote.final_amount, 950.0);
    }

    #[tokio::test]
    async fn unknown_coupon_is_a_conflict() {
        let mut repo = MockCouponRepository::new();
        repo.expect_find_valid()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = CouponUseCase::new(Arc::new(repo));
        let result = usecase.apply(Uuid::new_v4(), model(1000.0)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn amount_below_minimum_is_a_conflict() {
        let mut repo = MockCouponRepository::new();
        repo.expect_find_valid().returning(|code, _| {
            let coupon = sample_coupon(code, DiscountType::Flat);
            Box::pin(async move { Ok(Some(coupon)) })
        });

        let usecase = CouponUseCase::new(Arc::new(repo));
        let result = usecase.apply(Uuid::new_v4(), model(400.0)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn usage_limit_is_enforced_per_user() {
        let mut repo = MockCouponRepository::new();
        repo.expect_find_valid().returning(|code, _| {
            let coupon = sample_coupon(code, DiscountType::Percent);
            Box::pin(async move { Ok(Some(coupon)) })
        });
        repo.expect_usage_count()
            .returning(|_, _| Box::pin(async { Ok(2) }));

        let usecase = CouponUseCase::new(Arc::new(repo));
        let result = usecase.apply(Uuid::new_v4(), model(1000.0)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
