use std::sync::Arc;

use crate::application::ports::accommodation_repository::{
    AccommodationPhotoRepository, AccommodationRepository,
};
use crate::application::ports::activity_repository::{ActivityPhotoRepository, ActivityRepository};
use crate::application::ports::booking_repository::BookingRepository;
use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::invoice_repository::InvoiceRepository;
use crate::application::ports::payment_repository::PaymentRepository;
use crate::application::ports::photo_repository::PhotoRepository;
use crate::application::ports::subscription_repository::SubscriptionRepository;
use crate::application::ports::trip_repository::TripRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::{
    accommodation_photo_repository_sqlx::SqlxAccommodationPhotoRepository,
    accommodation_repository_sqlx::SqlxAccommodationRepository,
    activity_photo_repository_sqlx::SqlxActivityPhotoRepository,
    activity_repository_sqlx::SqlxActivityRepository,
    booking_repository_sqlx::SqlxBookingRepository,
    comment_repository_sqlx::SqlxCommentRepository,
    invoice_repository_sqlx::SqlxInvoiceRepository,
    payment_repository_sqlx::SqlxPaymentRepository, photo_repository_sqlx::SqlxPhotoRepository,
    subscription_repository_sqlx::SqlxSubscriptionRepository,
    trip_repository_sqlx::SqlxTripRepository, user_repository_sqlx::SqlxUserRepository,
};

/// Router state: configuration plus the shared repository set.
#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    trip_repo: Arc<dyn TripRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
    invoice_repo: Arc<dyn InvoiceRepository>,
    subscription_repo: Arc<dyn SubscriptionRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    photo_repo: Arc<dyn PhotoRepository>,
    accommodation_repo: Arc<dyn AccommodationRepository>,
    accommodation_photo_repo: Arc<dyn AccommodationPhotoRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
    activity_photo_repo: Arc<dyn ActivityPhotoRepository>,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        trip_repo: Arc<dyn TripRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        invoice_repo: Arc<dyn InvoiceRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        photo_repo: Arc<dyn PhotoRepository>,
        accommodation_repo: Arc<dyn AccommodationRepository>,
        accommodation_photo_repo: Arc<dyn AccommodationPhotoRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
        activity_photo_repo: Arc<dyn ActivityPhotoRepository>,
    ) -> Self {
        Self {
            user_repo,
            trip_repo,
            booking_repo,
            payment_repo,
            invoice_repo,
            subscription_repo,
            comment_repo,
            photo_repo,
            accommodation_repo,
            accommodation_photo_repo,
            activity_repo,
            activity_photo_repo,
        }
    }

    /// Wires every repository to the same Postgres pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(SqlxUserRepository::new(pool.clone())),
            Arc::new(SqlxTripRepository::new(pool.clone())),
            Arc::new(SqlxBookingRepository::new(pool.clone())),
            Arc::new(SqlxPaymentRepository::new(pool.clone())),
            Arc::new(SqlxInvoiceRepository::new(pool.clone())),
            Arc::new(SqlxSubscriptionRepository::new(pool.clone())),
            Arc::new(SqlxCommentRepository::new(pool.clone())),
            Arc::new(SqlxPhotoRepository::new(pool.clone())),
            Arc::new(SqlxAccommodationRepository::new(pool.clone())),
            Arc::new(SqlxAccommodationPhotoRepository::new(pool.clone())),
            Arc::new(SqlxActivityRepository::new(pool.clone())),
            Arc::new(SqlxActivityPhotoRepository::new(pool)),
        )
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn trip_repo(&self) -> Arc<dyn TripRepository> {
        self.services.trip_repo.clone()
    }

    pub fn booking_repo(&self) -> Arc<dyn BookingRepository> {
        self.services.booking_repo.clone()
    }

    pub fn payment_repo(&self) -> Arc<dyn PaymentRepository> {
        self.services.payment_repo.clone()
    }

    pub fn invoice_repo(&self) -> Arc<dyn InvoiceRepository> {
        self.services.invoice_repo.clone()
    }

    pub fn subscription_repo(&self) -> Arc<dyn SubscriptionRepository> {
        self.services.subscription_repo.clone()
    }

    pub fn comment_repo(&self) -> Arc<dyn CommentRepository> {
        self.services.comment_repo.clone()
    }

    pub fn photo_repo(&self) -> Arc<dyn PhotoRepository> {
        self.services.photo_repo.clone()
    }

    pub fn accommodation_repo(&self) -> Arc<dyn AccommodationRepository> {
        self.services.accommodation_repo.clone()
    }

    pub fn accommodation_photo_repo(&self) -> Arc<dyn AccommodationPhotoRepository> {
        self.services.accommodation_photo_repo.clone()
    }

    pub fn activity_repo(&self) -> Arc<dyn ActivityRepository> {
        self.services.activity_repo.clone()
    }

    pub fn activity_photo_repo(&self) -> Arc<dyn ActivityPhotoRepository> {
        self.services.activity_photo_repo.clone()
    }
}
