use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone)]
pub struct Invoice {
    pub id: i64,
    pub payment_id: i64,
    pub invoice_number: String,
    pub issued_at: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub payment_id: i64,
    pub invoice_number: String,
    pub due_date: NaiveDate,
    pub status: String,
}
