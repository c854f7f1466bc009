use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Activity {
    pub id: i64,
    pub trip_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub trip_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ActivityChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ActivityPhoto {
    pub id: i64,
    pub activity_id: i64,
    pub photo_url: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewActivityPhoto {
    pub activity_id: i64,
    pub photo_url: String,
}
