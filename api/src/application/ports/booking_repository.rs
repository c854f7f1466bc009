use async_trait::async_trait;

use crate::application::ports::store_error::StoreResult;
use crate::domain::bookings::{Booking, NewBooking};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &NewBooking) -> StoreResult<Booking>;
    async fn get_by_id(&self, id: i64) -> StoreResult<Booking>;
    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Booking>>;
    async fn list_by_user(&self, user_id: i64) -> StoreResult<Vec<Booking>>;
    async fn update_status(&self, id: i64, status: &str) -> StoreResult<Booking>;
}
