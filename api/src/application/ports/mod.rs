pub mod accommodation_repository;
pub mod activity_repository;
pub mod booking_repository;
pub mod comment_repository;
pub mod invoice_repository;
pub mod payment_repository;
pub mod photo_repository;
pub mod store_error;
pub mod subscription_repository;
pub mod trip_repository;
pub mod user_repository;

pub use store_error::{StoreError, StoreResult};
