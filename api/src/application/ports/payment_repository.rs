use async_trait::async_trait;

use crate::application::ports::store_error::StoreResult;
use crate::domain::payments::{NewPayment, Payment};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &NewPayment) -> StoreResult<Payment>;
    async fn get_by_id(&self, id: i64) -> StoreResult<Payment>;
    async fn list_by_user(&self, user_id: i64) -> StoreResult<Vec<Payment>>;
    async fn update_status(&self, id: i64, status: &str) -> StoreResult<Payment>;
}
