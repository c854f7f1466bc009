use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i64,
    pub booking_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub status: String,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub booking_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub status: String,
    pub transaction_id: String,
}
