use async_trait::async_trait;

use crate::application::ports::store_error::StoreResult;
use crate::domain::accommodations::{
    Accommodation, AccommodationChanges, AccommodationPhoto, NewAccommodation,
    NewAccommodationPhoto,
};

#[async_trait]
pub trait AccommodationRepository: Send + Sync {
    async fn create(&self, accommodation: &NewAccommodation) -> StoreResult<Accommodation>;
    async fn get_by_id(&self, id: i64) -> StoreResult<Accommodation>;
    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Accommodation>>;
    async fn update_by_id(
        &self,
        id: i64,
        changes: &AccommodationChanges,
    ) -> StoreResult<Accommodation>;
}

#[async_trait]
pub trait AccommodationPhotoRepository: Send + Sync {
    async fn create(&self, photo: &NewAccommodationPhoto) -> StoreResult<AccommodationPhoto>;
    async fn get_by_id(&self, id: i64) -> StoreResult<AccommodationPhoto>;
    async fn list_by_accommodation(
        &self,
        accommodation_id: i64,
    ) -> StoreResult<Vec<AccommodationPhoto>>;
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
    async fn delete_by_accommodation(&self, accommodation_id: i64) -> StoreResult<()>;
}
