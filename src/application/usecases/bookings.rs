use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    application::errors::AppError,
    domain::{
        repositories::{
            bookings::BookingRepository, cars::CarRepository, notifications::BookingNotifier,
            payments::PaymentGateway, users::UserRepository,
        },
        value_objects::{
            bookings::{
                BookingDetailModel, BookingListModel, BookingModel, CreateOrderModel,
                HostContactModel, ReservationInsertOutcome, VerifyPaymentModel,
            },
            enums::{
                booking_statuses::BookingStatus, photo_types::PhotoType, roles::Role,
                user_statuses::UserStatus,
            },
            payments::{PaymentOrder, verify_payment_signature},
        },
    },
};

pub struct BookingUseCase<B, C, U, P, N>
where
    B: BookingRepository + Send + Sync,
    C: CarRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    P: PaymentGateway + Send + Sync,
    N: BookingNotifier + Send + Sync,
{
    booking_repository: Arc<B>,
    car_repository: Arc<C>,
    user_repository: Arc<U>,
    payment_gateway: Arc<P>,
    notifier: Arc<N>,
    payment_key_secret: String,
}

impl<B, C, U, P, N> BookingUseCase<B, C, U, P, N>
where
    B: BookingRepository + Send + Sync,
    C: CarRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    P: PaymentGateway + Send + Sync,
    N: BookingNotifier + Send + Sync,
{
    pub fn new(
        booking_repository: Arc<B>,
        car_repository: Arc<C>,
        user_repository: Arc<U>,
        payment_gateway: Arc<P>,
        notifier: Arc<N>,
        payment_key_secret: String,
    ) -> Self {
        Self {
            booking_repository,
            car_repository,
            user_repository,
            payment_gateway,
            notifier,
            payment_key_secret,
        }
    }

    pub async fn create_order(
        &self,
        user_id: Uuid,
        create_order_model: CreateOrderModel,
    ) -> Result<PaymentOrder, AppError> {
        if create_order_model.start_date >= create_order_model.end_date {
            return Err(AppError::validation("start date must be before end date"));
        }
        if create_order_model.amount <= 0.0 {
            return Err(AppError::validation("amount must be positive"));
        }

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if UserStatus::try_from_str(&user.status) != Some(UserStatus::Active) {
            return Err(AppError::forbidden("Account is not active"));
        }

        // First-time gate: an unverified user may only carry a single
        // outstanding booking.
        if !user.is_verified {
            let prior = self
                .booking_repository
                .count_non_pending_for_user(user_id)
                .await?;
            if prior > 0 {
                return Err(AppError::conflict(
                    "Account must be verified before creating another booking",
                ));
            }
        }

        self.car_repository
            .find_by_id(create_order_model.car_id)
            .await?
            .ok_or_else(|| AppError::not_found("Car not found"))?;

        let amount_minor = (create_order_model.amount * 100.0).round() as i64;
        let receipt = Uuid::new_v4().to_string();

        let order = self
            .payment_gateway
            .create_order(amount_minor, &receipt)
            .await?;

        info!(%user_id, order_id = %order.order_id, "bookings: payment order created");
        Ok(order)
    }

    pub async fn verify_payment(
        &self,
        user_id: Uuid,
        verify_payment_model: VerifyPaymentModel,
    ) -> Result<Uuid, AppError> {
        if verify_payment_model.start_date >= verify_payment_model.end_date {
            return Err(AppError::validation("start date must be before end date"));
        }

        if !verify_payment_signature(
            &verify_payment_model.order_id,
            &verify_payment_model.payment_id,
            &verify_payment_model.signature,
            &self.payment_key_secret,
        ) {
            return Err(AppError::validation("Payment verification failed"));
        }

        let car = self
            .car_repository
            .find_by_id(verify_payment_model.car_id)
            .await?
            .ok_or_else(|| AppError::not_found("Car not found"))?;
        let host_id = car.user_id;

        let outcome = self
            .booking_repository
            .create_confirmed(verify_payment_model.to_entity(user_id, host_id))
            .await?;

        match outcome {
            ReservationInsertOutcome::Created(reservation_id) => {
                info!(%user_id, %reservation_id, "bookings: payment verified, booking confirmed");
                if let Err(error) = self.notifier.booking_confirmed(host_id, reservation_id).await
                {
                    warn!(%host_id, error = %error, "bookings: host notification failed");
                }
                Ok(reservation_id)
            }
            ReservationInsertOutcome::Conflict(_) => Err(AppError::conflict(
                "Car is already booked for the requested window",
            )),
        }
    }

    pub async fn list_bookings(&self, user_id: Uuid) -> Result<BookingListModel, AppError> {
        let rows = self.booking_repository.list_by_user(user_id).await?;
        let now = Utc::now();

        let mut upcoming = Vec::new();
        let mut past = Vec::new();
        for (entity, car) in rows {
            let status = BookingStatus::try_from_str(&entity.status).unwrap_or_default();
            let is_upcoming = !status.is_terminal() && entity.end_date >= now;
            let model = BookingModel::from_entity(entity, car);
            if is_upcoming {
                upcoming.push(model);
            } else {
                past.push(model);
            }
        }

        Ok(BookingListModel { upcoming, past })
    }

    pub async fn get_booking(
        &self,
        user_id: Uuid,
        reservation_id: Uuid,
    ) -> Result<BookingDetailModel, AppError> {
        let (entity, car) = self
            .booking_repository
            .find_with_car(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        if entity.user_id != user_id {
            return Err(AppError::forbidden("You cannot view this booking"));
        }

        let host = self
            .user_repository
            .find_by_id(entity.host_id)
            .await?
            .ok_or_else(|| AppError::not_found("Host not found"))?;

        let photos = self.booking_repository.list_photos(reservation_id).await?;
        let mut pickup_photos = Vec::new();
        let mut drop_photos = Vec::new();
        for photo in photos {
            match PhotoType::try_from_str(&photo.photo_type) {
                Some(PhotoType::Pickup) => pickup_photos.push(photo.photo_url),
                Some(PhotoType::Drop) => drop_photos.push(photo.photo_url),
                None => {}
            }
        }

        let security_deposit = car.security_deposit;
        Ok(BookingDetailModel {
            booking: BookingModel::from_entity(entity, car),
            security_deposit,
            host: HostContactModel {
                name: host.name,
                phone_number: host.phone_number,
                email: host.email,
            },
            pickup_photos,
            drop_photos,
        })
    }

    pub async fn cancel(
        &self,
        user_id: Uuid,
        role: Role,
        reservation_id: Uuid,
    ) -> Result<(), AppError> {
        let reservation = self
            .booking_repository
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))?;

        if reservation.user_id != user_id && role != Role::Admin {
            return Err(AppError::forbidden("You cannot cancel this reservation"));
        }

        let current = BookingStatus::try_from_str(&reservation.status)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("unknown booking status")))?;
        current
            .transition(BookingStatus::Cancelled)
            .map_err(|error| AppError::conflict(error.to_string()))?;

        let cancelled = self.booking_repository.cancel(reservation_id).await?;
        if !cancelled {
            return Err(AppError::conflict(
                "Reservation status changed, refresh and try again",
            ));
        }

        info!(%user_id, %reservation_id, "bookings: reservation cancelled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{cars::CarEntity, reservations::ReservationEntity, users::UserEntity},
        repositories::{
            bookings::MockBookingRepository, cars::MockCarRepository,
            notifications::MockBookingNotifier, payments::MockPaymentGateway,
            users::MockUserRepository,
        },
        value_objects::enums::settlement_statuses::SettlementStatus,
    };
    use chrono::Duration;
    use hmac::{Hmac, Mac};
    use mockall::predicate::eq;
    use sha2::Sha256;

    const TEST_SECRET: &str = "test-key-secret";

    fn usecase(
        booking_repo: MockBookingRepository,
        car_repo: MockCarRepository,
        user_repo: MockUserRepository,
        gateway: MockPaymentGateway,
        notifier: MockBookingNotifier,
    ) -> BookingUseCase<
        MockBookingRepository,
        MockCarRepository,
        MockUserRepository,
        MockPaymentGateway,
        MockBookingNotifier,
    > {
        BookingUseCase::new(
            Arc::new(booking_repo),
            Arc::new(car_repo),
            Arc::new(user_repo),
            Arc::new(gateway),
            Arc::new(notifier),
            TEST_SECRET.to_string(),
        )
    }

    fn sample_user(id: Uuid, is_verified: bool) -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id,
            phone_number: "+911234567890".to_string(),
            name: Some("Asha".to_string()),
            email: None,
            is_verified,
            role: Role::User.to_string(),
            status: UserStatus::Active.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_car(id: Uuid, host_id: Uuid) -> CarEntity {
        let now = Utc::now();
        CarEntity {
            id,
            user_id: host_id,
            title: "Swift".to_string(),
            city: "Pune".to_string(),
            price_per_hour: 120.0,
            security_deposit: 2000.0,
            seats: 5,
            doors: 4,
            luggage_capacity: 2,
            fuel_type: "PETROL".to_string(),
            transmission_type: "MANUAL".to_string(),
            category: None,
            latitude: None,
            longitude: None,
            is_approved: true,
            car_enabled: true,
            repair_mode: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_reservation(id: Uuid, user_id: Uuid, status: BookingStatus) -> ReservationEntity {
        let now = Utc::now();
        ReservationEntity {
            id,
            user_id,
            car_id: Uuid::new_v4(),
            host_id: Uuid::new_v4(),
            start_date: now + Duration::hours(2),
            end_date: now + Duration::hours(8),
            pickup_at: None,
            drop_at: None,
            amount: 720.0,
            total_hours: Some(6.0),
            order_id: Some("order_1".to_string()),
            payment_id: Some("pay_1".to_string()),
            coupon_code: None,
            status: status.to_string(),
            settlement_status: SettlementStatus::Pending.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sign(order_id: &str, payment_id: &str, secret: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn verify_model(car_id: Uuid, secret: &str) -> VerifyPaymentModel {
        let now = Utc::now();
        VerifyPaymentModel {
            car_id,
            start_date: now + Duration::hours(1),
            end_date: now + Duration::hours(5),
            amount: 480.0,
            total_hours: Some(4.0),
            coupon_code: None,
            order_id: "order_1".to_string(),
            payment_id: "pay_1".to_string(),
            signature: sign("order_1", "pay_1", secret),
        }
    }

    #[tokio::test]
    async fn unverified_user_with_prior_booking_cannot_create_order() {
        let user_id = Uuid::new_v4();
        let car_id = Uuid::new_v4();

        let mut booking_repo = MockBookingRepository::new();
        booking_repo
            .expect_count_non_pending_for_user()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(1) }));

        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_id().returning(move |id| {
            let user = sample_user(id, false);
            Box::pin(async move { Ok(Some(user)) })
        });

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_order().never();

        let usecase = usecase(
            booking_repo,
            MockCarRepository::new(),
            user_repo,
            gateway,
            MockBookingNotifier::new(),
        );

        let now = Utc::now();
        let result = usecase
            .create_order(
                user_id,
                CreateOrderModel {
                    car_id,
                    start_date: now + Duration::hours(1),
                    end_date: now + Duration::hours(3),
                    amount: 240.0,
                    total_hours: Some(2.0),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn create_order_requests_gateway_order_in_minor_units() {
        let user_id = Uuid::new_v4();
        let car_id = Uuid::new_v4();

        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_id().returning(move |id| {
            let user = sample_user(id, true);
            Box::pin(async move { Ok(Some(user)) })
        });

        let mut car_repo = MockCarRepository::new();
        car_repo.expect_find_by_id().returning(move |id| {
            let car = sample_car(id, Uuid::new_v4());
            Box::pin(async move { Ok(Some(car)) })
        });

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_order()
            .withf(|amount_minor, _receipt| *amount_minor == 24_050)
            .returning(|amount_minor, _| {
                Box::pin(async move {
                    Ok(PaymentOrder {
                        order_id: "order_1".to_string(),
                        amount_minor,
                        currency: "INR".to_string(),
                    })
                })
            });

        let usecase = usecase(
            MockBookingRepository::new(),
            car_repo,
            user_repo,
            gateway,
            MockBookingNotifier::new(),
        );

        let now = Utc::now();
        let order = usecase
            .create_order(
                user_id,
                CreateOrderModel {
                    car_id,
                    start_date: now + Duration::hours(1),
                    end_date: now + Duration::hours(3),
                    amount: 240.50,
                    total_hours: Some(2.0),
                },
            )
            .await
            .unwrap();

        assert_eq!(order.order_id, "order_1");
        assert_eq!(order.amount_minor, 24_050);
    }

    #[tokio::test]
    async fn wrong_signature_rejects_without_insert() {
        let user_id = Uuid::new_v4();
        let car_id = Uuid::new_v4();

        let mut booking_repo = MockBookingRepository::new();
        booking_repo.expect_create_confirmed().never();

        let usecase = usecase(
            booking_repo,
            MockCarRepository::new(),
            MockUserRepository::new(),
            MockPaymentGateway::new(),
            MockBookingNotifier::new(),
        );

        let model = verify_model(car_id, "some-other-secret");
        let result = usecase.verify_payment(user_id, model).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn verified_payment_creates_confirmed_booking_and_notifies_host() {
        let user_id = Uuid::new_v4();
        let car_id = Uuid::new_v4();
        let host_id = Uuid::new_v4();
        let reservation_id = Uuid::new_v4();

        let mut car_repo = MockCarRepository::new();
        car_repo.expect_find_by_id().with(eq(car_id)).returning(
            move |id| {
                let car = sample_car(id, host_id);
                Box::pin(async move { Ok(Some(car)) })
            },
        );

        let mut booking_repo = MockBookingRepository::new();
        booking_repo
            .expect_create_confirmed()
            .withf(move |entity| {
                entity.host_id == host_id
                    && entity.status == BookingStatus::Confirmed.to_string()
                    && entity.settlement_status == SettlementStatus::Pending.to_string()
            })
            .returning(move |_| {
                Box::pin(async move { Ok(ReservationInsertOutcome::Created(reservation_id)) })
            });

        let mut notifier = MockBookingNotifier::new();
        notifier
            .expect_booking_confirmed()
            .with(eq(host_id), eq(reservation_id))
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let usecase = usecase(
            booking_repo,
            car_repo,
            MockUserRepository::new(),
            MockPaymentGateway::new(),
            notifier,
        );

        let model = verify_model(car_id, TEST_SECRET);
        let created = usecase.verify_payment(user_id, model).await.unwrap();
        assert_eq!(created, reservation_id);
    }

    #[tokio::test]
    async fn overlapping_window_conflict_rejects_booking() {
        let user_id = Uuid::new_v4();
        let car_id = Uuid::new_v4();

        let mut car_repo = MockCarRepository::new();
        car_repo.expect_find_by_id().returning(move |id| {
            let car = sample_car(id, Uuid::new_v4());
            Box::pin(async move { Ok(Some(car)) })
        });

        let mut booking_repo = MockBookingRepository::new();
        booking_repo.expect_create_confirmed().returning(|_| {
            Box::pin(async { Ok(ReservationInsertOutcome::Conflict(Vec::new())) })
        });

        let mut notifier = MockBookingNotifier::new();
        notifier.expect_booking_confirmed().never();

        let usecase = usecase(
            booking_repo,
            car_repo,
            MockUserRepository::new(),
            MockPaymentGateway::new(),
            notifier,
        );

        let model = verify_model(car_id, TEST_SECRET);
        let result = usecase.verify_payment(user_id, model).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn cancelling_completed_reservation_never_mutates() {
        let user_id = Uuid::new_v4();
        let reservation_id = Uuid::new_v4();

        let mut booking_repo = MockBookingRepository::new();
        booking_repo
            .expect_find_by_id()
            .with(eq(reservation_id))
            .returning(move |id| {
                let reservation = sample_reservation(id, user_id, BookingStatus::Completed);
                Box::pin(async move { Ok(Some(reservation)) })
            });
        booking_repo.expect_cancel().never();

        let usecase = usecase(
            booking_repo,
            MockCarRepository::new(),
            MockUserRepository::new(),
            MockPaymentGateway::new(),
            MockBookingNotifier::new(),
        );

        let result = usecase.cancel(user_id, Role::User, reservation_id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn cancelling_cancelled_reservation_is_a_state_conflict() {
        let user_id = Uuid::new_v4();
        let reservation_id = Uuid::new_v4();

        let mut booking_repo = MockBookingRepository::new();
        booking_repo.expect_find_by_id().returning(move |id| {
            let reservation = sample_reservation(id, user_id, BookingStatus::Cancelled);
            Box::pin(async move { Ok(Some(reservation)) })
        });
        booking_repo.expect_cancel().never();

        let usecase = usecase(
            booking_repo,
            MockCarRepository::new(),
            MockUserRepository::new(),
            MockPaymentGateway::new(),
            MockBookingNotifier::new(),
        );

        let result = usecase.cancel(user_id, Role::User, reservation_id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn stranger_cannot_cancel_someone_elses_reservation() {
        let owner_id = Uuid::new_v4();
        let stranger_id = Uuid::new_v4();
        let reservation_id = Uuid::new_v4();

        let mut booking_repo = MockBookingRepository::new();
        booking_repo.expect_find_by_id().returning(move |id| {
            let reservation = sample_reservation(id, owner_id, BookingStatus::Confirmed);
            Box::pin(async move { Ok(Some(reservation)) })
        });
        booking_repo.expect_cancel().never();

        let usecase = usecase(
            booking_repo,
            MockCarRepository::new(),
            MockUserRepository::new(),
            MockPaymentGateway::new(),
            MockBookingNotifier::new(),
        );

        let result = usecase
            .cancel(stranger_id, Role::User, reservation_id)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn cancel_losing_the_status_race_is_a_state_conflict() {
        // Read sees CONFIRMED but the trip starts before the write; the
        // guarded update matches no row and the cancel must not clobber it.
        let user_id = Uuid::new_v4();
        let reservation_id = Uuid::new_v4();

        let mut booking_repo = MockBookingRepository::new();
        booking_repo.expect_find_by_id().returning(move |id| {
            let reservation = sample_reservation(id, user_id, BookingStatus::Confirmed);
            Box::pin(async move { Ok(Some(reservation)) })
        });
        booking_repo
            .expect_cancel()
            .returning(|_| Box::pin(async { Ok(false) }));

        let usecase = usecase(
            booking_repo,
            MockCarRepository::new(),
            MockUserRepository::new(),
            MockPaymentGateway::new(),
            MockBookingNotifier::new(),
        );

        let result = usecase.cancel(user_id, Role::User, reservation_id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn confirmed_reservation_cancels_cleanly() {
        let user_id = Uuid::new_v4();
        let reservation_id = Uuid::new_v4();

        let mut booking_repo = MockBookingRepository::new();
        booking_repo.expect_find_by_id().returning(move |id| {
            let reservation = sample_reservation(id, user_id, BookingStatus::Confirmed);
            Box::pin(async move { Ok(Some(reservation)) })
        });
        booking_repo
            .expect_cancel()
            .with(eq(reservation_id))
            .returning(|_| Box::pin(async { Ok(true) }));

        let usecase = usecase(
            booking_repo,
            MockCarRepository::new(),
            MockUserRepository::new(),
            MockPaymentGateway::new(),
            MockBookingNotifier::new(),
        );

        usecase
            .cancel(user_id, Role::User, reservation_id)
            .await
            .unwrap();
    }
}
