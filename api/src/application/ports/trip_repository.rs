use async_trait::async_trait;
use chrono::NaiveDate;

use crate::application::ports::store_error::StoreResult;
use crate::domain::trips::{NewTrip, Trip, TripChanges};

#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn create(&self, trip: &NewTrip) -> StoreResult<Trip>;
    async fn get_by_id(&self, id: i64) -> StoreResult<Trip>;
    async fn list_all(&self) -> StoreResult<Vec<Trip>>;
    async fn list_by_location(&self, location: &str) -> StoreResult<Vec<Trip>>;
    // trips starting on or after `from`, soonest first
    async fn list_upcoming(&self, from: NaiveDate) -> StoreResult<Vec<Trip>>;
    async fn update_by_id(&self, id: i64, changes: &TripChanges) -> StoreResult<Trip>;
}
