pub mod accommodation_photo_repository_sqlx;
pub mod accommodation_repository_sqlx;
pub mod activity_photo_repository_sqlx;
pub mod activity_repository_sqlx;
pub mod booking_repository_sqlx;
pub mod comment_repository_sqlx;
pub mod invoice_repository_sqlx;
pub mod payment_repository_sqlx;
pub mod photo_repository_sqlx;
pub mod subscription_repository_sqlx;
pub mod trip_repository_sqlx;
pub mod user_repository_sqlx;
