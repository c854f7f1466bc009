use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Photo {
    pub id: i64,
    pub trip_id: i64,
    pub photo_url: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub trip_id: i64,
    pub photo_url: String,
}
