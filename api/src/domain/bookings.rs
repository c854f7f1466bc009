use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub trip_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i64,
    pub trip_id: i64,
    pub status: String,
}
