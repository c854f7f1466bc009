use async_trait::async_trait;

use crate::application::ports::store_error::StoreResult;
use crate::domain::activities::{
    Activity, ActivityChanges, ActivityPhoto, NewActivity, NewActivityPhoto,
};

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn create(&self, activity: &NewActivity) -> StoreResult<Activity>;
    async fn get_by_id(&self, id: i64) -> StoreResult<Activity>;
    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Activity>>;
    async fn update_by_id(&self, id: i64, changes: &ActivityChanges) -> StoreResult<Activity>;
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}

#[async_trait]
pub trait ActivityPhotoRepository: Send + Sync {
    async fn create(&self, photo: &NewActivityPhoto) -> StoreResult<ActivityPhoto>;
    async fn get_by_id(&self, id: i64) -> StoreResult<ActivityPhoto>;
    async fn list_by_activity(&self, activity_id: i64) -> StoreResult<Vec<ActivityPhoto>>;
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
    async fn delete_by_activity(&self, activity_id: i64) -> StoreResult<()>;
}
