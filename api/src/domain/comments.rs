use chrono::{DateTime, Utc};

/// A user's review of a trip.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub trip_id: i64,
    pub comment: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: i64,
    pub trip_id: i64,
    pub comment: String,
    pub rating: i32,
}
