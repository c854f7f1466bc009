use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::payment_repository::PaymentRepository;
use crate::application::ports::store_error::StoreResult;
use crate::domain::payments::{NewPayment, Payment};
use crate::infrastructure::db::{PgPool, bounded};

pub struct SqlxPaymentRepository {
    pub pool: PgPool,
}

impl SqlxPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_payment(r: &PgRow) -> Payment {
    Payment {
        id: r.get("id"),
        booking_id: r.get("booking_id"),
        user_id: r.get("user_id"),
        amount: r.get("amount"),
        status: r.get("status"),
        transaction_id: r.get("transaction_id"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl PaymentRepository for SqlxPaymentRepository {
    async fn create(&self, payment: &NewPayment) -> StoreResult<Payment> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO payments (booking_id, user_id, amount, status, transaction_id)
                   VALUES ($1, $2, $3, $4, $5)
                   RETURNING id, booking_id, user_id, amount, status, transaction_id, created_at"#,
            )
            .bind(payment.booking_id)
            .bind(payment.user_id)
            .bind(payment.amount)
            .bind(&payment.status)
            .bind(&payment.transaction_id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_payment(&row))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Payment> {
        let row = bounded(
            sqlx::query(
                r#"SELECT id, booking_id, user_id, amount, status, transaction_id, created_at
                   FROM payments WHERE id = $1"#,
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_payment(&row))
    }

    async fn list_by_user(&self, user_id: i64) -> StoreResult<Vec<Payment>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, booking_id, user_id, amount, status, transaction_id, created_at
                   FROM payments WHERE user_id = $1 ORDER BY id"#,
            )
            .bind(user_id)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_payment).collect())
    }

    async fn update_status(&self, id: i64, status: &str) -> StoreResult<Payment> {
        let row = bounded(
            sqlx::query(
                r#"UPDATE payments SET status = $1 WHERE id = $2
                   RETURNING id, booking_id, user_id, amount, status, transaction_id, created_at"#,
            )
            .bind(status)
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_payment(&row))
    }
}
