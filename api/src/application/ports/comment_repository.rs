use async_trait::async_trait;

use crate::application::ports::store_error::StoreResult;
use crate::domain::comments::{Comment, NewComment};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &NewComment) -> StoreResult<Comment>;
    async fn get_by_id(&self, id: i64) -> StoreResult<Comment>;
    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Comment>>;
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
    async fn delete_by_trip(&self, trip_id: i64) -> StoreResult<()>;
}
