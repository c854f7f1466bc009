use async_trait::async_trait;

use crate::application::ports::store_error::StoreResult;
use crate::domain::photos::{NewPhoto, Photo};

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn create(&self, photo: &NewPhoto) -> StoreResult<Photo>;
    async fn get_by_id(&self, id: i64) -> StoreResult<Photo>;
    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Photo>>;
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
    /// `NotFound` when the trip has no photos.
    async fn delete_by_trip(&self, trip_id: i64) -> StoreResult<()>;
}
