use async_trait::async_trait;

use crate::application::ports::store_error::StoreResult;
use crate::domain::users::{NewUser, User, UserChanges};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn create(&self, user: &NewUser) -> StoreResult<User>;
    async fn get_by_id(&self, id: i64) -> StoreResult<User>;
    async fn get_by_email(&self, email: &str) -> StoreResult<User>;
    async fn update_by_id(&self, id: i64, changes: &UserChanges) -> StoreResult<User>;
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}
