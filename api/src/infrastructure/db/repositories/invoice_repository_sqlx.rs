use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::invoice_repository::InvoiceRepository;
use crate::application::ports::store_error::StoreResult;
use crate::domain::invoices::{Invoice, NewInvoice};
use crate::infrastructure::db::{PgPool, bounded};

pub struct SqlxInvoiceRepository {
    pub pool: PgPool,
}

impl SqlxInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_invoice(r: &PgRow) -> Invoice {
    Invoice {
        id: r.get("id"),
        payment_id: r.get("payment_id"),
        invoice_number: r.get("invoice_number"),
        issued_at: r.get("issued_at"),
        due_date: r.get("due_date"),
        status: r.get("status"),
    }
}

#[async_trait]
impl InvoiceRepository for SqlxInvoiceRepository {
    async fn create(&self, invoice: &NewInvoice) -> StoreResult<Invoice> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO invoices (payment_id, invoice_number, due_date, status)
                   VALUES ($1, $2, $3, $4)
                   RETURNING id, payment_id, invoice_number, issued_at, due_date, status"#,
            )
            .bind(invoice.payment_id)
            .bind(&invoice.invoice_number)
            .bind(invoice.due_date)
            .bind(&invoice.status)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_invoice(&row))
    }

    async fn get_by_number(&self, invoice_number: &str) -> StoreResult<Invoice> {
        let row = bounded(
            sqlx::query(
                r#"SELECT id, payment_id, invoice_number, issued_at, due_date, status
                   FROM invoices WHERE invoice_number = $1"#,
            )
            .bind(invoice_number)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_invoice(&row))
    }

    async fn list_by_payment(&self, payment_id: i64) -> StoreResult<Vec<Invoice>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, payment_id, invoice_number, issued_at, due_date, status
                   FROM invoices WHERE payment_id = $1 ORDER BY issued_at, id"#,
            )
            .bind(payment_id)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_invoice).collect())
    }

    async fn update_status_by_number(
        &self,
        invoice_number: &str,
        status: &str,
    ) -> StoreResult<Invoice> {
        let row = bounded(
            sqlx::query(
                r#"UPDATE invoices SET status = $1 WHERE invoice_number = $2
                   RETURNING id, payment_id, invoice_number, issued_at, due_date, status"#,
            )
            .bind(status)
            .bind(invoice_number)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_invoice(&row))
    }
}
