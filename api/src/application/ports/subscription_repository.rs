use async_trait::async_trait;

use crate::application::ports::store_error::StoreResult;
use crate::domain::subscriptions::{NewSubscription, Subscription};

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(&self, sub: &NewSubscription) -> StoreResult<Subscription>;
    async fn list_all(&self) -> StoreResult<Vec<Subscription>>;
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
    async fn delete_by_user(&self, user_id: i64) -> StoreResult<()>;
    async fn delete_by_email(&self, email: &str) -> StoreResult<()>;
}
