use async_trait::async_trait;

use crate::application::ports::store_error::StoreResult;
use crate::domain::invoices::{Invoice, NewInvoice};

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// The issue timestamp is assigned by the store.
    async fn create(&self, invoice: &NewInvoice) -> StoreResult<Invoice>;
    async fn get_by_number(&self, invoice_number: &str) -> StoreResult<Invoice>;
    async fn list_by_payment(&self, payment_id: i64) -> StoreResult<Vec<Invoice>>;
    async fn update_status_by_number(
        &self,
        invoice_number: &str,
        status: &str,
    ) -> StoreResult<Invoice>;
}
